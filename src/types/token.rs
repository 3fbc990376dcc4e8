//! Token Types
//!
//! Normalized token endpoint response.

use chrono::{DateTime, Duration, Utc};

/// Token type assumed when the provider omits `token_type`.
pub const DEFAULT_TOKEN_TYPE: &str = "bearer";

/// Normalized token response.
///
/// Typed fields are populated only when the provider sent them; the full
/// decoded object is kept in `raw` for provider-specific fields.
#[derive(Clone, PartialEq)]
pub struct TokenResponse {
    /// Access token.
    pub access_token: Option<String>,
    /// ID token (OIDC), passed through unverified.
    pub id_token: Option<String>,
    /// Refresh token.
    pub refresh_token: Option<String>,
    /// Lifetime of the access token in seconds.
    pub expires_in: Option<i64>,
    /// Token type.
    pub token_type: String,
    /// Granted scopes.
    pub scope: Option<String>,
    /// Decoded response object.
    pub raw: serde_json::Map<String, serde_json::Value>,
    /// When the response was decoded.
    pub received_at: DateTime<Utc>,
}

impl TokenResponse {
    /// Raw response field by name.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.raw.get(key)
    }

    /// Granted scopes split on whitespace.
    pub fn scopes(&self) -> Vec<String> {
        self.scope
            .as_ref()
            .map(|s| s.split_whitespace().map(String::from).collect())
            .unwrap_or_default()
    }

    /// Absolute expiry computed from receipt time.
    ///
    /// `None` when the lifetime is absent or does not fit a timestamp.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let lifetime = Duration::try_seconds(self.expires_in?)?;
        self.received_at.checked_add_signed(lifetime)
    }

    /// Format as Authorization header value.
    pub fn authorization_header(&self) -> Option<String> {
        self.access_token
            .as_ref()
            .map(|token| format!("{} {}", self.token_type, token))
    }
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("TokenResponse")
            .field("access_token", &redact(&self.access_token))
            .field("id_token", &redact(&self.id_token))
            .field("refresh_token", &redact(&self.refresh_token))
            .field("expires_in", &self.expires_in)
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .field("received_at", &self.received_at)
            .finish()
    }
}
