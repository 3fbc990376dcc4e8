//! Token Handling
//!
//! Normalization of token endpoint responses.

pub mod normalize;

pub use normalize::{decode_expires_in, normalize_token_response};
