//! Integration tests for the callback-style operations

use super::*;
use oidclite::{result_channel, AuthOutcome, PasswordCredentials};

#[tokio::test]
async fn test_spawned_exchange_reports_tokens() {
    let server = setup_provider().await;
    let client = discovered_client(&server, None).await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .mount(&server)
        .await;

    let (notifier, mut receiver) = result_channel();
    client.spawn_exchange_redirect("oidclite://openID?code=abc123", false, &notifier);

    let outcome = receiver.recv().await.unwrap();
    assert_eq!(
        outcome.tokens().and_then(|t| t.access_token.clone()).as_deref(),
        Some("integration-at")
    );
}

#[tokio::test]
async fn test_spawned_exchange_reports_missing_code() {
    let server = setup_provider().await;
    let client = discovered_client(&server, None).await;

    let (notifier, mut receiver) = result_channel();
    client.spawn_exchange_redirect("oidclite://openID?state=xyz", false, &notifier);

    assert_eq!(
        receiver.recv().await,
        Some(AuthOutcome::Failure(oidclite::OidcError::CodeNotFound))
    );
}

#[tokio::test]
async fn test_spawned_password_grant_override() {
    let server = setup_provider().await;
    let client = discovered_client(&server, None).await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("mfa_required"))
        .mount(&server)
        .await;

    let (notifier, mut receiver) = result_channel();
    client.spawn_password_grant_with_overrides(
        PasswordCredentials::new("alice", "pw"),
        true,
        vec!["mfa_required".to_string()],
        &notifier,
    );

    assert_eq!(
        receiver.recv().await,
        Some(AuthOutcome::RopgOverride("mfa_required".to_string()))
    );
}

#[tokio::test]
async fn test_spawned_discovery_then_refresh() {
    let server = setup_provider().await;
    let client = OidcClient::new(config(&server, None)).unwrap();
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "at"})))
        .mount(&server)
        .await;

    let (notifier, mut receiver) = result_channel();
    client.spawn_discover(&notifier).await.unwrap().unwrap();
    client.spawn_refresh_tokens("rt", &notifier);

    assert!(receiver.recv().await.unwrap().is_tokens());
}
