//! OpenID Connect Client Flow Engine
//!
//! Resolves provider endpoints, builds PKCE-protected login URLs and
//! exchanges codes, refresh tokens and resource-owner credentials for tokens.
//!
//! # Features
//!
//! - OIDC Discovery, async and blocking
//! - Authorization Code with PKCE (RFC 6749 Section 4.1, RFC 7636 S256)
//! - Token Refresh (RFC 6749 Section 6)
//! - Resource Owner Password Credentials (RFC 6749 Section 4.3), with
//!   caller-defined override bodies
//! - Normalized token responses (`expires_in` as number or numeric string)
//! - Suspending (`async fn`) and callback-style (`spawn_*` + [`ResultNotifier`]) operations
//!
//! # Example
//!
//! ```rust,ignore
//! use oidclite::{oidc_config, OidcClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = oidc_config()
//!         .discovery_url("https://idp.example.com/.well-known/openid-configuration")
//!         .client_id("my-client-id")
//!         .redirect_uri("myapp://callback")
//!         .build()?;
//!
//!     let client = OidcClient::new(config)?;
//!     client.discover().await?;
//!
//!     let request = client.authorization_request().ok_or("no authorization endpoint")?;
//!     println!("Open: {}", request.url);
//!
//!     // ... the user-agent lands on the redirect URL ...
//!     let redirect = "myapp://callback?state=xyz&code=abc123";
//!     let tokens = client.exchange_redirect(redirect, false).await?;
//!     println!("Access token expires at {:?}", tokens.expires_at());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `types`: configuration, discovery, PKCE, token and outcome types
//! - `error`: error taxonomy and provider-body rendering
//! - `core`: HTTP transport, PKCE, attempt state, discovery, result notifier
//! - `flows`: login URL construction and the token grants
//! - `token`: token response normalization
//! - `builders`: fluent configuration builder
//! - `telemetry`: tracing subscriber setup and log helpers
//! - `client`: high-level client combining all of the above

pub mod builders;
pub mod client;
pub mod core;
pub mod error;
pub mod flows;
pub mod telemetry;
pub mod token;
pub mod types;

// Re-export main client
pub use client::{oidc_client, OidcClient};

// Re-export builders
pub use builders::{oidc_config, ClientConfigurationBuilder};

// Re-export errors
pub use error::{pretty_print_json_body, OidcError, OidcResult};

// Re-export types
pub use types::{
    // Config
    ClientConfiguration, DEFAULT_REDIRECT_URI, DEFAULT_SCOPES,
    // Discovery
    DiscoveryDocument,
    // Auth
    AuthorizationAttempt, AuthorizationRequest, PasswordCredentials, PkceChallenge, PkceMethod,
    // Token
    TokenResponse,
    // Outcome
    AuthOutcome, GrantOutcome,
    // Redirect
    parse_authorization_code, parse_authorization_code_str, redirect_error,
};

// Re-export core components
pub use core::{
    // Transport
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, MockHttpTransport,
    ReqwestHttpTransport,
    // PKCE
    DefaultPkceGenerator, FixedPkceGenerator, PkceGenerator,
    // Attempts
    AttemptTracker,
    // Discovery
    DefaultDiscoveryResolver, DiscoveryResolver,
    // Notifier
    result_channel, OutcomeReceiver, ResultNotifier,
};

// Re-export flows
pub use flows::{
    AuthorizationCodeFlow, AuthorizationCodeFlowImpl, PasswordFlow, PasswordFlowImpl,
    RefreshTokenFlow, RefreshTokenFlowImpl,
};

// Re-export token normalization
pub use token::normalize_token_response;
