//! PKCE Generator
//!
//! RFC 7636 Proof Key for Code Exchange, S256 only.

use base64::Engine;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::types::{PkceChallenge, PkceMethod};

/// PKCE generator interface (for dependency injection).
pub trait PkceGenerator: Send + Sync {
    /// Generate a fresh verifier and its challenge.
    fn generate(&self) -> PkceChallenge;
}

/// Default PKCE generator.
///
/// The verifier is two random v4 UUIDs in hyphenated form, concatenated,
/// giving 72 unreserved ASCII characters.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultPkceGenerator;

impl DefaultPkceGenerator {
    /// Create new PKCE generator.
    pub fn new() -> Self {
        Self
    }

    fn generate_verifier() -> String {
        format!(
            "{}{}",
            Uuid::new_v4().hyphenated(),
            Uuid::new_v4().hyphenated()
        )
    }
}

impl PkceGenerator for DefaultPkceGenerator {
    fn generate(&self) -> PkceChallenge {
        challenge_for_verifier(Self::generate_verifier())
    }
}

/// Generator that always yields the same verifier. Useful in tests.
#[derive(Clone, Debug)]
pub struct FixedPkceGenerator {
    verifier: String,
}

impl FixedPkceGenerator {
    /// Create a generator for the given verifier.
    pub fn new(verifier: impl Into<String>) -> Self {
        Self {
            verifier: verifier.into(),
        }
    }
}

impl PkceGenerator for FixedPkceGenerator {
    fn generate(&self) -> PkceChallenge {
        challenge_for_verifier(self.verifier.clone())
    }
}

/// Compute `BASE64URL-NOPAD(SHA256(verifier))`.
pub fn compute_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(hash)
}

/// Build a challenge for an existing verifier.
pub fn challenge_for_verifier(code_verifier: String) -> PkceChallenge {
    let code_challenge = compute_challenge(&code_verifier);
    PkceChallenge {
        code_verifier,
        code_challenge,
        method: PkceMethod::S256,
    }
}
