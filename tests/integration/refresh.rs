//! Integration tests for the refresh token grant

use super::*;
use oidclite::OidcError;
use wiremock::matchers::body_string;

#[tokio::test]
async fn test_refresh_tokens() {
    let server = setup_provider().await;
    let client = discovered_client(&server, Some("secret")).await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string(
            "grant_type=refresh_token&refresh_token=integration-rt\
             &client_id=test-client&client_secret=secret",
        ))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "fresh-at", "expires_in": 900})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let tokens = client.refresh_tokens("integration-rt").await.unwrap();

    assert_eq!(tokens.access_token.as_deref(), Some("fresh-at"));
    assert_eq!(tokens.expires_in, Some(900));
    assert_eq!(tokens.token_type, "bearer");
    assert!(tokens.refresh_token.is_none());
}

#[tokio::test]
async fn test_refresh_empty_response() {
    let server = setup_provider().await;
    let client = discovered_client(&server, None).await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let error = client.refresh_tokens("rt").await.unwrap_err();
    assert_eq!(error, OidcError::AuthFailure("bad response".to_string()));
}

#[tokio::test]
async fn test_refresh_rejected() {
    let server = setup_provider().await;
    let client = discovered_client(&server, None).await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "invalid_grant"})))
        .mount(&server)
        .await;

    let error = client.refresh_tokens("rt").await.unwrap_err();
    assert_eq!(error, OidcError::TokenError("error:  invalid_grant".to_string()));
}
