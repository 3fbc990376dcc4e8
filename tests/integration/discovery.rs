//! Integration tests for discovery

use super::*;
use oidclite::OidcError;
use wiremock::matchers::header;

#[tokio::test]
async fn test_discovery_populates_endpoints() {
    let server = setup_provider().await;
    let client = OidcClient::new(config(&server, None)).unwrap();

    let document = client.discover().await.unwrap();

    assert_eq!(document.authorization_endpoint, format!("{}/authorize", server.uri()));
    assert_eq!(document.token_endpoint, format!("{}/token", server.uri()));
    assert_eq!(document.issuer.as_deref(), Some(server.uri().as_str()));
    assert_eq!(client.discovery(), document);
}

#[tokio::test]
async fn test_discovery_request_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DISCOVERY_PATH))
        .and(header("accept", "application/json"))
        .and(header("cache-control", "no-cache"))
        .respond_with(discovery_response(&server))
        .expect(1)
        .mount(&server)
        .await;

    let client = OidcClient::new(config(&server, None)).unwrap();
    client.discover().await.unwrap();
}

#[tokio::test]
async fn test_discovery_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DISCOVERY_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let client = OidcClient::new(config(&server, None)).unwrap();
    let error = client.discover().await.unwrap_err();

    assert_eq!(
        error,
        OidcError::DiscoveryLoadFailed {
            status: 503,
            body: "maintenance".to_string()
        }
    );
    assert!(!client.discovery().is_resolved());
}

#[tokio::test]
async fn test_discovery_non_object_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DISCOVERY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["not", "an", "object"])))
        .mount(&server)
        .await;

    let client = OidcClient::new(config(&server, None)).unwrap();
    let error = client.discover().await.unwrap_err();

    assert!(matches!(error, OidcError::DiscoveryParseFailed { .. }));
}

#[test]
fn test_blocking_discovery() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(setup_provider());

    let client = OidcClient::new(config(&server, None)).unwrap();
    client.discover_blocking().unwrap();

    assert_eq!(
        client.discovery().token_endpoint,
        format!("{}/token", server.uri())
    );
}

#[test]
fn test_blocking_discovery_reports_http_error() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(MockServer::start());
    runtime.block_on(
        Mock::given(method("GET"))
            .and(path(DISCOVERY_PATH))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server),
    );

    let client = OidcClient::new(config(&server, None)).unwrap();
    let error = client.discover_blocking().unwrap_err();

    assert!(matches!(error, OidcError::DiscoveryLoadFailed { status: 404, .. }));
}
