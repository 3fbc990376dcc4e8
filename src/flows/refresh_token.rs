//! Refresh Token Flow
//!
//! RFC 6749 Section 6 - Refreshing an Access Token.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

use crate::core::{HttpRequest, HttpTransport};
use crate::error::{OidcError, OidcResult, BAD_RESPONSE};
use crate::flows::{normalize_grant_body, post_token_request, FormBody};
use crate::types::{ClientConfiguration, TokenResponse};

/// Refresh Token Flow interface.
#[async_trait]
pub trait RefreshTokenFlow: Send + Sync {
    /// Exchange a refresh token for a new token set.
    async fn refresh_tokens(&self, refresh_token: &str) -> OidcResult<TokenResponse>;
}

/// Refresh Token Flow implementation. Credentials always travel in the body.
pub struct RefreshTokenFlowImpl<T: HttpTransport> {
    config: Arc<ClientConfiguration>,
    token_endpoint: String,
    transport: Arc<T>,
}

impl<T: HttpTransport> RefreshTokenFlowImpl<T> {
    /// Create new Refresh Token Flow against `token_endpoint`.
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

    fn build_request_body(&self, refresh_token: &str) -> String {
        FormBody::new()
            .field("grant_type", "refresh_token")
            .field("refresh_token", refresh_token)
            .field("client_id", self.config.client_id())
            .optional_field("client_secret", self.config.client_secret())
            .build()
    }
}

#[async_trait]
impl<T: HttpTransport> RefreshTokenFlow for RefreshTokenFlowImpl<T> {
    #[instrument(name = "oidc.refresh_tokens", skip(self, refresh_token))]
    async fn refresh_tokens(&self, refresh_token: &str) -> OidcResult<TokenResponse> {
        let request = HttpRequest::form_post(
            &self.token_endpoint,
            self.build_request_body(refresh_token),
        );
        let response = post_token_request(self.transport.as_ref(), request).await?;

        if !response.has_body() {
            tracing::warn!(status = response.status, "Refresh returned no body");
            return Err(OidcError::auth_failure(BAD_RESPONSE));
        }
        if !response.is_success() {
            tracing::debug!(status = response.status, "Refresh returned non-success status");
        }

        normalize_grant_body(&response.body)
    }
}
