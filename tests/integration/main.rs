//! Integration tests using WireMock
//!
//! These tests drive `OidcClient` with the real reqwest transport against a
//! mock identity provider, covering discovery, the token grants and the
//! callback-style notifier path.

mod callbacks;
mod code_exchange;
mod discovery;
mod password;
mod refresh;

use oidclite::{oidc_config, ClientConfiguration, OidcClient};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const DISCOVERY_PATH: &str = "/.well-known/openid-configuration";

/// Start a provider whose discovery document points back at itself.
pub async fn setup_provider() -> MockServer {
    let server = MockServer::start().await;
    let _ = oidclite::telemetry::init_logging("oidclite=debug");

    Mock::given(method("GET"))
        .and(path(DISCOVERY_PATH))
        .respond_with(discovery_response(&server))
        .mount(&server)
        .await;

    server
}

pub fn discovery_response(server: &MockServer) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "issuer": server.uri(),
        "authorization_endpoint": format!("{}/authorize", server.uri()),
        "token_endpoint": format!("{}/token", server.uri()),
    }))
}

pub fn config(server: &MockServer, secret: Option<&str>) -> ClientConfiguration {
    let mut builder = oidc_config()
        .discovery_url(format!("{}{}", server.uri(), DISCOVERY_PATH))
        .client_id("test-client");
    if let Some(secret) = secret {
        builder = builder.client_secret(secret);
    }
    builder.build().expect("valid configuration")
}

/// Client against `server` with discovery already performed.
pub async fn discovered_client(server: &MockServer, secret: Option<&str>) -> OidcClient {
    let client = OidcClient::new(config(server, secret)).expect("Failed to build client");
    client.discover().await.expect("discovery succeeds");
    client
}

pub fn token_body() -> serde_json::Value {
    json!({
        "access_token": "integration-at",
        "id_token": "header.payload.signature",
        "refresh_token": "integration-rt",
        "expires_in": "3600",
        "token_type": "Bearer",
        "scope": "openid profile"
    })
}
