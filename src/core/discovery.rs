//! OIDC Discovery
//!
//! Resolves provider endpoints from the discovery document.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

use crate::core::transport::{HttpRequest, HttpTransport};
use crate::error::{OidcError, OidcResult};
use crate::telemetry::body_preview;
use crate::types::DiscoveryDocument;

/// Discovery resolver interface (for dependency injection).
#[async_trait]
pub trait DiscoveryResolver: Send + Sync {
    /// Fetch and parse the discovery document at `discovery_url`.
    async fn resolve(&self, discovery_url: &str) -> OidcResult<DiscoveryDocument>;
}

/// Default discovery resolver.
///
/// Documents are not cached; every call hits the network.
pub struct DefaultDiscoveryResolver<T: HttpTransport> {
    transport: Arc<T>,
}

impl<T: HttpTransport> DefaultDiscoveryResolver<T> {
    /// Create new discovery resolver.
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }
}

impl<T: HttpTransport + 'static> DefaultDiscoveryResolver<T> {
    /// Resolve on a background thread and block the caller until it finishes.
    ///
    /// Must not be called from inside an async task: it parks the current
    /// thread on a channel until the request completes or fails.
    pub fn resolve_blocking(&self, discovery_url: &str) -> OidcResult<DiscoveryDocument> {
        let transport = Arc::clone(&self.transport);
        let url = discovery_url.to_string();
        let (tx, rx) = std::sync::mpsc::sync_channel(1);

        std::thread::spawn(move || {
            let result = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime.block_on(fetch_discovery(transport.as_ref(), &url)),
                Err(e) => Err(OidcError::Transport {
                    message: format!("Failed to start discovery runtime: {}", e),
                }),
            };
            let _ = tx.send(result);
        });

        rx.recv().unwrap_or_else(|_| {
            Err(OidcError::Transport {
                message: "Discovery worker exited without a result".to_string(),
            })
        })
    }
}

#[async_trait]
impl<T: HttpTransport> DiscoveryResolver for DefaultDiscoveryResolver<T> {
    async fn resolve(&self, discovery_url: &str) -> OidcResult<DiscoveryDocument> {
        fetch_discovery(self.transport.as_ref(), discovery_url).await
    }
}

#[instrument(name = "oidc.discovery", skip(transport))]
async fn fetch_discovery<T: HttpTransport + ?Sized>(
    transport: &T,
    discovery_url: &str,
) -> OidcResult<DiscoveryDocument> {
    if url::Url::parse(discovery_url).is_err() {
        return Err(OidcError::InvalidUrl {
            url: discovery_url.to_string(),
        });
    }

    let request = HttpRequest::get(discovery_url)
        .header("accept", "application/json")
        .header("cache-control", "no-cache");

    let response = transport.send(request).await?;

    if !response.is_success() {
        tracing::warn!(status = response.status, "Discovery request failed");
        return Err(OidcError::DiscoveryLoadFailed {
            status: response.status,
            body: response.body,
        });
    }

    let value: serde_json::Value =
        serde_json::from_str(&response.body).map_err(|e| OidcError::DiscoveryParseFailed {
            message: format!("{}: {}", e, body_preview(&response.body)),
        })?;

    let object = value
        .as_object()
        .ok_or_else(|| OidcError::DiscoveryParseFailed {
            message: format!("expected a JSON object: {}", body_preview(&response.body)),
        })?;

    let document = DiscoveryDocument::from_json_object(object);
    tracing::debug!(
        authorization_endpoint = %document.authorization_endpoint,
        token_endpoint = %document.token_endpoint,
        "Discovery document resolved"
    );

    Ok(document)
}
