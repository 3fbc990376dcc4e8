//! Discovery Types
//!
//! Provider metadata extracted from an OpenID Connect discovery document.

use serde::{Deserialize, Serialize};

/// Endpoints resolved from the provider's discovery document.
///
/// Missing endpoints are represented as empty strings, never as errors.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryDocument {
    /// Authorization endpoint URL.
    pub authorization_endpoint: String,
    /// Token endpoint URL.
    pub token_endpoint: String,
    /// Issuer identifier (not validated).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    /// Userinfo endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub userinfo_endpoint: Option<String>,
    /// JWKS URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jwks_uri: Option<String>,
    /// RP-initiated logout endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_session_endpoint: Option<String>,
}

impl DiscoveryDocument {
    /// Extract endpoints from a decoded discovery object.
    pub fn from_json_object(object: &serde_json::Map<String, serde_json::Value>) -> Self {
        let string_field = |key: &str| {
            object
                .get(key)
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };

        Self {
            authorization_endpoint: string_field("authorization_endpoint").unwrap_or_default(),
            token_endpoint: string_field("token_endpoint").unwrap_or_default(),
            issuer: string_field("issuer"),
            userinfo_endpoint: string_field("userinfo_endpoint"),
            jwks_uri: string_field("jwks_uri"),
            end_session_endpoint: string_field("end_session_endpoint"),
        }
    }

    /// Whether both endpoints needed by the flows are populated.
    pub fn is_resolved(&self) -> bool {
        !self.authorization_endpoint.is_empty() && !self.token_endpoint.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_object() {
        let value = json!({
            "issuer": "https://idp",
            "authorization_endpoint": "https://idp/auth",
            "token_endpoint": "https://idp/token",
            "jwks_uri": "https://idp/jwks"
        });

        let doc = DiscoveryDocument::from_json_object(value.as_object().unwrap());
        assert_eq!(doc.authorization_endpoint, "https://idp/auth");
        assert_eq!(doc.token_endpoint, "https://idp/token");
        assert_eq!(doc.issuer.as_deref(), Some("https://idp"));
        assert_eq!(doc.jwks_uri.as_deref(), Some("https://idp/jwks"));
        assert!(doc.userinfo_endpoint.is_none());
        assert!(doc.is_resolved());
    }

    #[test]
    fn test_missing_endpoints_default_to_empty() {
        let value = json!({"token_endpoint": 42});
        let doc = DiscoveryDocument::from_json_object(value.as_object().unwrap());
        assert_eq!(doc.authorization_endpoint, "");
        assert_eq!(doc.token_endpoint, "");
        assert!(!doc.is_resolved());
    }
}
