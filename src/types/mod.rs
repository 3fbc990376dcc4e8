//! OIDC Types
//!
//! Core type definitions for the flow engine.

pub mod auth;
pub mod callback;
pub mod config;
pub mod discovery;
pub mod outcome;
pub mod token;

pub use auth::*;
pub use callback::*;
pub use config::*;
pub use discovery::*;
pub use outcome::*;
pub use token::*;
