//! Authorization Code Flow
//!
//! RFC 6749 Section 4.1 with RFC 7636 PKCE - exchanges the redirect code.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

use crate::core::{HttpRequest, HttpTransport};
use crate::error::{pretty_print_json_body, OidcError, OidcResult};
use crate::flows::{basic_authorization, post_token_request, FormBody};
use crate::token::normalize_token_response;
use crate::types::{ClientConfiguration, TokenResponse};

/// Authorization Code Flow interface.
#[async_trait]
pub trait AuthorizationCodeFlow: Send + Sync {
    /// Exchange an authorization code for tokens.
    ///
    /// With `basic_auth` the client credentials travel in an `Authorization`
    /// header, otherwise the secret (if any) is sent in the body.
    async fn exchange_code(
        &self,
        code: &str,
        code_verifier: &str,
        basic_auth: bool,
    ) -> OidcResult<TokenResponse>;
}

/// Authorization Code Flow implementation.
pub struct AuthorizationCodeFlowImpl<T: HttpTransport> {
    config: Arc<ClientConfiguration>,
    token_endpoint: String,
    transport: Arc<T>,
}

impl<T: HttpTransport> AuthorizationCodeFlowImpl<T> {
    /// Create new Authorization Code Flow against `token_endpoint`.
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

    /// Body layout: `grant_type`, `client_id`, optional `client_secret`,
    /// `redirect_uri`, `code`, `code_verifier`. The code is forwarded exactly
    /// as it appeared in the redirect.
    fn build_request_body(&self, code: &str, code_verifier: &str, basic_auth: bool) -> String {
        let mut body = FormBody::new()
            .field("grant_type", "authorization_code")
            .field("client_id", self.config.client_id());

        if !basic_auth {
            body = body.optional_field("client_secret", self.config.client_secret());
        }

        body.encoded_field(
            "redirect_uri",
            &urlencoding::encode(self.config.redirect_uri()),
        )
        .encoded_field("code", code)
        .field("code_verifier", code_verifier)
        .build()
    }

    fn build_request(&self, code: &str, code_verifier: &str, basic_auth: bool) -> HttpRequest {
        let body = self.build_request_body(code, code_verifier, basic_auth);
        let request = HttpRequest::form_post(&self.token_endpoint, body);

        if basic_auth {
            request.header(
                "authorization",
                basic_authorization(self.config.client_id(), self.config.client_secret()),
            )
        } else {
            request
        }
    }
}

#[async_trait]
impl<T: HttpTransport> AuthorizationCodeFlow for AuthorizationCodeFlowImpl<T> {
    #[instrument(
        name = "oidc.exchange_code",
        skip(self, code, code_verifier),
        fields(token_endpoint = %self.token_endpoint)
    )]
    async fn exchange_code(
        &self,
        code: &str,
        code_verifier: &str,
        basic_auth: bool,
    ) -> OidcResult<TokenResponse> {
        let request = self.build_request(code, code_verifier, basic_auth);
        let response = post_token_request(self.transport.as_ref(), request).await?;

        if response.status != 200 {
            tracing::warn!(status = response.status, "Authorization code exchange rejected");
            let message = match pretty_print_json_body(&response.body) {
                Some(pretty) => format!("HTTP {}\n{}", response.status, pretty),
                None => response.description(),
            };
            return Err(OidcError::AuthFailure(message));
        }

        let tokens = normalize_token_response(&response.body)?;
        tracing::info!(
            has_refresh_token = tokens.refresh_token.is_some(),
            has_id_token = tokens.id_token.is_some(),
            "Authorization code exchanged"
        );
        Ok(tokens)
    }
}
