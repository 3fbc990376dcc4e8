//! OIDC Flows
//!
//! Authorization request construction and the token endpoint grants:
//!
//! - **Authorization request**: PKCE-protected login URL for the user-agent
//! - **Authorization Code** (RFC 6749 Section 4.1 + RFC 7636): code for tokens
//! - **Refresh Token** (RFC 6749 Section 6): refresh token for new tokens
//! - **Password** (RFC 6749 Section 4.3): resource-owner credentials for tokens

pub mod authorization_code;
pub mod authorization_request;
pub mod password;
pub mod refresh_token;

pub use authorization_code::{AuthorizationCodeFlow, AuthorizationCodeFlowImpl};
pub use authorization_request::{build_authorization_request, build_authorization_url};
pub use password::{PasswordFlow, PasswordFlowImpl};
pub use refresh_token::{RefreshTokenFlow, RefreshTokenFlowImpl};

use base64::Engine;

use crate::core::{HttpRequest, HttpResponse, HttpTransport};
use crate::error::{pretty_print_json_body, OidcError, OidcResult};
use crate::token::normalize_token_response;
use crate::types::TokenResponse;

/// Form-encode a single value (spaces become `+`).
pub(crate) fn form_encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// `application/x-www-form-urlencoded` body, kept in insertion order.
#[derive(Debug, Default)]
pub(crate) struct FormBody {
    pairs: Vec<String>,
}

impl FormBody {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append a form-encoded field.
    pub(crate) fn field(mut self, key: &str, value: &str) -> Self {
        self.pairs.push(format!("{}={}", key, form_encode(value)));
        self
    }

    /// Append a field only when a value is present.
    pub(crate) fn optional_field(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.field(key, v),
            None => self,
        }
    }

    /// Append a value that is already encoded.
    pub(crate) fn encoded_field(mut self, key: &str, value: &str) -> Self {
        self.pairs.push(format!("{}={}", key, value));
        self
    }

    pub(crate) fn build(self) -> String {
        self.pairs.join("&")
    }
}

/// `Basic` credentials from `client_id[:secret]`.
pub(crate) fn basic_authorization(client_id: &str, client_secret: Option<&str>) -> String {
    let credentials = match client_secret {
        Some(secret) => format!("{}:{}", client_id, secret),
        None => client_id.to_string(),
    };
    format!(
        "Basic {}",
        base64::engine::general_purpose::STANDARD.encode(credentials)
    )
}

/// POST a form to the token endpoint.
///
/// Connection-level failures are reported as `AuthFailure`.
pub(crate) async fn post_token_request<T: HttpTransport + ?Sized>(
    transport: &T,
    request: HttpRequest,
) -> OidcResult<HttpResponse> {
    if request.url.is_empty() {
        return Err(OidcError::auth_failure(
            "Token endpoint is not resolved; run discovery first",
        ));
    }

    let request = request.header("accept", "application/json");
    transport.send(request).await.map_err(|e| match e {
        OidcError::Transport { message } => OidcError::AuthFailure(message),
        other => other,
    })
}

/// Normalize a body that may carry an OAuth2 error object instead of tokens.
///
/// A payload with an `error` member and no `access_token` is a token-level
/// rejection and becomes `TokenError` with the pretty-printed body.
pub(crate) fn normalize_grant_body(body: &str) -> OidcResult<TokenResponse> {
    let tokens = normalize_token_response(body)?;
    if tokens.access_token.is_none() && tokens.raw.contains_key("error") {
        let message = pretty_print_json_body(body).unwrap_or_else(|| body.to_string());
        return Err(OidcError::TokenError(message));
    }
    Ok(tokens)
}
