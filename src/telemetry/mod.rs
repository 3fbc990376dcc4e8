//! Telemetry
//!
//! Structured logging support. Flows emit `tracing` events and spans; this
//! module holds the helpers they share plus an opt-in subscriber installer.

use tracing_subscriber::EnvFilter;

use crate::error::{OidcError, OidcResult};

/// Longest body excerpt included in log fields and diagnostic messages.
pub const MAX_BODY_PREVIEW: usize = 512;

/// Install a global `fmt` subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter`. Fails if a global
/// subscriber is already installed.
pub fn init_logging(default_filter: &str) -> OidcResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|e| OidcError::Configuration {
            message: format!("Invalid log filter: {}", e),
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| OidcError::Configuration {
            message: format!("Failed to install logger: {}", e),
        })
}

/// Truncate a response body for logging.
pub fn body_preview(body: &str) -> String {
    if body.len() <= MAX_BODY_PREVIEW {
        return body.to_string();
    }

    let mut end = MAX_BODY_PREVIEW;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... ({} bytes)", &body[..end], body.len())
}
