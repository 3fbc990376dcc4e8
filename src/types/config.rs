//! Configuration Types
//!
//! Client configuration for an OpenID Connect relying party.

use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;

/// Redirect URI used when none is configured.
pub const DEFAULT_REDIRECT_URI: &str = "oidclite://openID";

/// Scopes requested when none are configured.
pub const DEFAULT_SCOPES: [&str; 4] = ["openid", "profile", "email", "offline_access"];

/// Authorization request parameters set by the client itself; they cannot be
/// supplied as additional parameters.
pub const RESERVED_AUTHORIZATION_PARAMETERS: [&str; 8] = [
    "client_id",
    "response_type",
    "scope",
    "redirect_uri",
    "state",
    "code_challenge_method",
    "code_challenge",
    "nonce",
];

/// Relying-party configuration. Immutable once built.
#[derive(Clone)]
pub struct ClientConfiguration {
    pub(crate) discovery_url: String,
    pub(crate) client_id: String,
    pub(crate) client_secret: Option<SecretString>,
    pub(crate) redirect_uri: String,
    pub(crate) scopes: Vec<String>,
    pub(crate) resource: Option<String>,
    pub(crate) additional_parameters: HashMap<String, String>,
}

impl ClientConfiguration {
    /// Discovery document URL.
    pub fn discovery_url(&self) -> &str {
        &self.discovery_url
    }

    /// Client identifier.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Client secret, if this is a confidential client.
    pub fn client_secret(&self) -> Option<&str> {
        self.client_secret.as_ref().map(|s| s.expose_secret().as_str())
    }

    /// Redirect URI registered with the provider.
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Requested scopes, in order.
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// Scopes joined by a single space.
    pub fn scope_string(&self) -> String {
        self.scopes.join(" ")
    }

    /// Resource indicator sent with password grants.
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// Extra authorization request parameters.
    pub fn additional_parameters(&self) -> &HashMap<String, String> {
        &self.additional_parameters
    }
}

impl std::fmt::Debug for ClientConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfiguration")
            .field("discovery_url", &self.discovery_url)
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("redirect_uri", &self.redirect_uri)
            .field("scopes", &self.scopes)
            .field("resource", &self.resource)
            .field("additional_parameters", &self.additional_parameters)
            .finish()
    }
}
