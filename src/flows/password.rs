//! Resource Owner Password Credentials Flow
//!
//! RFC 6749 Section 4.3 - exchanges a username and password for tokens.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

use crate::core::{HttpRequest, HttpTransport};
use crate::error::{OidcError, OidcResult, BAD_RESPONSE};
use crate::flows::{basic_authorization, normalize_grant_body, post_token_request, FormBody};
use crate::token::normalize_token_response;
use crate::types::{ClientConfiguration, GrantOutcome, PasswordCredentials, TokenResponse};

/// Password Flow interface.
#[async_trait]
pub trait PasswordFlow: Send + Sync {
    /// Request tokens with resource-owner credentials.
    ///
    /// Client credentials are sent both as a `Basic` header and in the body.
    async fn password_grant(&self, credentials: &PasswordCredentials)
        -> OidcResult<TokenResponse>;

    /// Request tokens, treating selected 401 bodies as a non-fatal outcome.
    ///
    /// A 401 whose raw body equals one of `override_errors` yields
    /// [`GrantOutcome::RopgOverride`] carrying that body.
    async fn password_grant_with_overrides(
        &self,
        credentials: &PasswordCredentials,
        basic_auth: bool,
        override_errors: &[String],
    ) -> OidcResult<GrantOutcome>;
}

/// Password Flow implementation.
pub struct PasswordFlowImpl<T: HttpTransport> {
    config: Arc<ClientConfiguration>,
    token_endpoint: String,
    transport: Arc<T>,
}

impl<T: HttpTransport> PasswordFlowImpl<T> {
    /// Create new Password Flow against `token_endpoint`.
    pub fn new(
        config: Arc<ClientConfiguration>,
        token_endpoint: impl Into<String>,
        transport: Arc<T>,
    ) -> Self {
        Self {
            config,
            token_endpoint: token_endpoint.into(),
            transport,
        }
    }

    fn build_request_body(&self, credentials: &PasswordCredentials, inline_secret: bool) -> String {
        let body = FormBody::new()
            .field("grant_type", "password")
            .field("username", &credentials.username)
            .field("password", credentials.password())
            .field("scope", &self.config.scope_string())
            .optional_field("resource", self.config.resource())
            .field("client_id", self.config.client_id());

        if inline_secret {
            body.optional_field("client_secret", self.config.client_secret())
                .build()
        } else {
            body.build()
        }
    }

    fn basic_header(&self) -> String {
        basic_authorization(self.config.client_id(), self.config.client_secret())
    }
}

#[async_trait]
impl<T: HttpTransport> PasswordFlow for PasswordFlowImpl<T> {
    #[instrument(
        name = "oidc.password_grant",
        skip(self, credentials),
        fields(username = %credentials.username)
    )]
    async fn password_grant(
        &self,
        credentials: &PasswordCredentials,
    ) -> OidcResult<TokenResponse> {
        let request = HttpRequest::form_post(
            &self.token_endpoint,
            self.build_request_body(credentials, true),
        )
        .header("authorization", self.basic_header());

        let response = post_token_request(self.transport.as_ref(), request).await?;

        if !response.has_body() {
            tracing::warn!(status = response.status, "Password grant returned no body");
            return Err(OidcError::auth_failure(BAD_RESPONSE));
        }

        normalize_grant_body(&response.body)
    }

    #[instrument(
        name = "oidc.password_grant",
        skip(self, credentials, override_errors),
        fields(username = %credentials.username)
    )]
    async fn password_grant_with_overrides(
        &self,
        credentials: &PasswordCredentials,
        basic_auth: bool,
        override_errors: &[String],
    ) -> OidcResult<GrantOutcome> {
        let body = self.build_request_body(credentials, !basic_auth);
        let mut request = HttpRequest::form_post(&self.token_endpoint, body);
        if basic_auth {
            request = request.header("authorization", self.basic_header());
        }

        let response = post_token_request(self.transport.as_ref(), request).await?;

        if response.is_success() {
            return normalize_token_response(&response.body).map(GrantOutcome::Tokens);
        }

        if response.status == 401 && override_errors.iter().any(|e| *e == response.body) {
            tracing::info!("Password grant rejected with override body");
            return Ok(GrantOutcome::RopgOverride(response.body));
        }

        tracing::warn!(status = response.status, "Password grant rejected");
        if response.has_body() {
            Err(OidcError::AuthFailure(response.body))
        } else {
            Err(OidcError::AuthFailure(response.description()))
        }
    }
}
