//! OIDC Core Components
//!
//! Core infrastructure: HTTP transport, attempt state, PKCE, discovery and
//! outcome delivery.

pub mod discovery;
pub mod notifier;
pub mod pkce;
pub mod state;
pub mod transport;

pub use discovery::*;
pub use notifier::*;
pub use pkce::*;
pub use state::*;
pub use transport::*;
