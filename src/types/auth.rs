//! Authorization Types
//!
//! Types for PKCE-protected authorization requests and password grants.

use secrecy::{ExposeSecret, SecretString};

/// PKCE challenge method.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PkceMethod {
    /// SHA-256 hash.
    #[default]
    S256,
}

impl PkceMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::S256 => "S256",
        }
    }
}

/// PKCE verifier and its derived challenge.
#[derive(Clone, PartialEq, Eq)]
pub struct PkceChallenge {
    /// Code verifier (keep secret).
    pub code_verifier: String,
    /// Code challenge (sent in the authorization URL).
    pub code_challenge: String,
    /// Challenge method used.
    pub method: PkceMethod,
}

impl std::fmt::Debug for PkceChallenge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PkceChallenge")
            .field("code_verifier", &"[REDACTED]")
            .field("code_challenge", &self.code_challenge)
            .field("method", &self.method)
            .finish()
    }
}

/// One login attempt: the values sent in a single authorization URL.
///
/// `state` and `nonce` are fresh for every attempt. The verifier belongs to the
/// client instance and is shared by all of its attempts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationAttempt {
    /// Anti-forgery state value.
    pub state: String,
    /// Replay-protection nonce.
    pub nonce: String,
    /// PKCE parameters sent with this attempt.
    pub pkce: PkceChallenge,
}

impl AuthorizationAttempt {
    /// Code verifier to present at the token endpoint.
    pub fn code_verifier(&self) -> &str {
        &self.pkce.code_verifier
    }
}

/// Result of authorization URL construction.
#[derive(Clone, Debug)]
pub struct AuthorizationRequest {
    /// The URL to hand to the user-agent.
    pub url: url::Url,
    /// Attempt values embedded in the URL.
    pub attempt: AuthorizationAttempt,
}

/// Resource-owner credentials for the password grant.
#[derive(Clone)]
pub struct PasswordCredentials {
    /// Username.
    pub username: String,
    password: SecretString,
}

impl PasswordCredentials {
    /// Create credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::new(password.into()),
        }
    }

    /// Password value.
    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

impl std::fmt::Debug for PasswordCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
