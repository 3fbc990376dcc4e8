//! Attempt State
//!
//! Random `state` / `nonce` generation and tracking of the current attempt.

use parking_lot::Mutex;
use rand::Rng;

use crate::types::{AuthorizationAttempt, PkceChallenge};

/// Generate a URL-safe random token (32 random bytes, base64url).
pub fn generate_random_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 32] = rng.gen();
    base64::Engine::encode(&base64::engine::general_purpose::URL_SAFE_NO_PAD, bytes)
}

/// Create a fresh attempt around the instance's PKCE challenge.
pub fn new_attempt(pkce: &PkceChallenge) -> AuthorizationAttempt {
    AuthorizationAttempt {
        state: generate_random_token(),
        nonce: generate_random_token(),
        pkce: pkce.clone(),
    }
}

/// Holds the most recent attempt of a client instance.
///
/// Only one attempt is tracked; starting a new one replaces the previous.
#[derive(Debug, Default)]
pub struct AttemptTracker {
    current: Mutex<Option<AuthorizationAttempt>>,
}

impl AttemptTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new attempt, returning the one it replaced.
    pub fn record(&self, attempt: AuthorizationAttempt) -> Option<AuthorizationAttempt> {
        self.current.lock().replace(attempt)
    }

    /// The most recent attempt.
    pub fn current(&self) -> Option<AuthorizationAttempt> {
        self.current.lock().clone()
    }
}
