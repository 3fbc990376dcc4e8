//! Outcome Types
//!
//! Results delivered to callers of the flows.

use crate::error::OidcError;
use crate::types::TokenResponse;

/// Successful result of the password grant when override bodies are accepted.
#[derive(Clone, Debug, PartialEq)]
pub enum GrantOutcome {
    /// The provider issued tokens.
    Tokens(TokenResponse),
    /// The provider rejected the credentials with a body the caller marked as actionable.
    RopgOverride(String),
}

/// Outcome reported through a [`ResultNotifier`](crate::core::ResultNotifier).
#[derive(Clone, Debug, PartialEq)]
pub enum AuthOutcome {
    /// Tokens were issued.
    Tokens(TokenResponse),
    /// The operation failed.
    Failure(OidcError),
    /// Password grant ended with a caller-supplied override body.
    RopgOverride(String),
}

impl AuthOutcome {
    /// Whether tokens were issued.
    pub fn is_tokens(&self) -> bool {
        matches!(self, Self::Tokens(_))
    }

    /// Tokens, if issued.
    pub fn tokens(&self) -> Option<&TokenResponse> {
        match self {
            Self::Tokens(tokens) => Some(tokens),
            _ => None,
        }
    }

    /// Failure message, if the operation failed.
    pub fn failure_message(&self) -> Option<String> {
        match self {
            Self::Failure(error) => Some(error.message()),
            _ => None,
        }
    }
}

impl From<Result<TokenResponse, OidcError>> for AuthOutcome {
    fn from(result: Result<TokenResponse, OidcError>) -> Self {
        match result {
            Ok(tokens) => Self::Tokens(tokens),
            Err(error) => Self::Failure(error),
        }
    }
}

impl From<Result<GrantOutcome, OidcError>> for AuthOutcome {
    fn from(result: Result<GrantOutcome, OidcError>) -> Self {
        match result {
            Ok(GrantOutcome::Tokens(tokens)) => Self::Tokens(tokens),
            Ok(GrantOutcome::RopgOverride(message)) => Self::RopgOverride(message),
            Err(error) => Self::Failure(error),
        }
    }
}
