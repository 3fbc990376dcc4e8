//! OIDC Error Types
//!
//! Failure taxonomy shared by every flow, plus helpers for rendering
//! provider error bodies into diagnosable messages.

use thiserror::Error;

/// Root error type for the flow engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OidcError {
    /// The redirect URL carried no `code=` query segment.
    #[error("Authorization code not found in redirect URL")]
    CodeNotFound,

    /// The discovery endpoint answered with a non-success status.
    #[error("Discovery document failed to load: HTTP {status}: {body}")]
    DiscoveryLoadFailed { status: u16, body: String },

    /// The discovery endpoint answered with a body that is not a JSON object.
    #[error("Discovery document could not be parsed: {message}")]
    DiscoveryParseFailed { message: String },

    /// Token-level semantic error.
    #[error("Token error: {0}")]
    TokenError(String),

    /// Transport errors, non-success token responses and decode failures.
    #[error("Authentication failed: {0}")]
    AuthFailure(String),

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },

    #[error("Transport error: {message}")]
    Transport { message: String },
}

impl OidcError {
    /// Get error code for telemetry.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::CodeNotFound => "OIDC_CODE_NOT_FOUND",
            Self::DiscoveryLoadFailed { .. } => "OIDC_DISCOVERY_LOAD",
            Self::DiscoveryParseFailed { .. } => "OIDC_DISCOVERY_PARSE",
            Self::TokenError(_) => "OIDC_TOKEN",
            Self::AuthFailure(_) => "OIDC_AUTH_FAILURE",
            Self::Configuration { .. } => "OIDC_CONFIG",
            Self::InvalidUrl { .. } => "OIDC_INVALID_URL",
            Self::Transport { .. } => "OIDC_TRANSPORT",
        }
    }

    /// Whether the error belongs to the catch-all authentication failure class.
    ///
    /// Transport failures are reported on the same channel as provider
    /// rejections, so both count.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::AuthFailure(_) | Self::Transport { .. })
    }

    /// Human-readable message without the variant prefix.
    pub fn message(&self) -> String {
        match self {
            Self::TokenError(message) | Self::AuthFailure(message) => message.clone(),
            Self::Transport { message } => message.clone(),
            other => other.to_string(),
        }
    }

    pub(crate) fn auth_failure(message: impl Into<String>) -> Self {
        Self::AuthFailure(message.into())
    }
}

/// Result type for flow operations.
pub type OidcResult<T> = Result<T, OidcError>;

/// Message reported when a token endpoint returns no data at all.
pub const BAD_RESPONSE: &str = "bad response";

/// Render a JSON object body as `key:  value` lines.
///
/// Returns `None` when the body is not a JSON object. String values are
/// printed without quotes; everything else uses its JSON rendering.
pub fn pretty_print_json_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;

    let lines = object
        .iter()
        .map(|(key, value)| match value {
            serde_json::Value::String(s) => format!("{}:  {}", key, s),
            other => format!("{}:  {}", key, other),
        })
        .collect::<Vec<_>>();

    Some(lines.join("\n"))
}
