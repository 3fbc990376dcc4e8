//! OIDC Client
//!
//! High-level client that ties discovery, the login URL and the token grants
//! together for one application registration.

use parking_lot::RwLock;
use std::sync::Arc;
use tokio::task::JoinHandle;
use url::Url;

use crate::core::{
    AttemptTracker, DefaultDiscoveryResolver, DefaultPkceGenerator, DiscoveryResolver,
    HttpTransport, PkceGenerator, ReqwestHttpTransport, ResultNotifier,
};
use crate::error::OidcResult;
use crate::flows::{
    build_authorization_request, AuthorizationCodeFlow, AuthorizationCodeFlowImpl, PasswordFlow,
    PasswordFlowImpl, RefreshTokenFlow, RefreshTokenFlowImpl,
};
use crate::types::{
    parse_authorization_code_str, AuthOutcome, AuthorizationAttempt, AuthorizationRequest,
    ClientConfiguration, DiscoveryDocument, GrantOutcome, PasswordCredentials, PkceChallenge,
    TokenResponse,
};

/// OIDC client for one provider registration.
///
/// Cloning is cheap: clones share the configuration, transport, discovery
/// document and attempt tracker. The PKCE verifier is generated once at
/// construction and reused for every attempt of the instance.
pub struct OidcClient<T: HttpTransport = ReqwestHttpTransport> {
    config: Arc<ClientConfiguration>,
    transport: Arc<T>,
    discovery: Arc<RwLock<DiscoveryDocument>>,
    pkce: PkceChallenge,
    attempts: Arc<AttemptTracker>,
}

impl<T: HttpTransport> Clone for OidcClient<T> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            transport: Arc::clone(&self.transport),
            discovery: Arc::clone(&self.discovery),
            pkce: self.pkce.clone(),
            attempts: Arc::clone(&self.attempts),
        }
    }
}

impl OidcClient<ReqwestHttpTransport> {
    /// Create a new client with its own HTTP transport.
    pub fn new(config: ClientConfiguration) -> OidcResult<Self> {
        let transport = ReqwestHttpTransport::new()?;
        Ok(Self::with_components(
            config,
            transport,
            &DefaultPkceGenerator::new(),
        ))
    }
}

impl<T: HttpTransport> OidcClient<T> {
    /// Create a client with custom implementations.
    pub fn with_components(
        config: ClientConfiguration,
        transport: T,
        pkce_generator: &impl PkceGenerator,
    ) -> Self {
        Self {
            config: Arc::new(config),
            transport: Arc::new(transport),
            discovery: Arc::new(RwLock::new(DiscoveryDocument::default())),
            pkce: pkce_generator.generate(),
            attempts: Arc::new(AttemptTracker::new()),
        }
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfiguration {
        &self.config
    }

    /// Get the HTTP transport.
    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// The instance's PKCE challenge.
    pub fn pkce(&self) -> &PkceChallenge {
        &self.pkce
    }

    /// Snapshot of the current discovery document.
    pub fn discovery(&self) -> DiscoveryDocument {
        self.discovery.read().clone()
    }

    /// Replace the discovery document, e.g. with endpoints known ahead of time.
    pub fn set_discovery(&self, document: DiscoveryDocument) {
        *self.discovery.write() = document;
    }

    fn token_endpoint(&self) -> String {
        self.discovery.read().token_endpoint.clone()
    }

    // ========== Discovery ==========

    /// Fetch the discovery document and store the resolved endpoints.
    pub async fn discover(&self) -> OidcResult<DiscoveryDocument> {
        let resolver = DefaultDiscoveryResolver::new(Arc::clone(&self.transport));
        let document = resolver.resolve(self.config.discovery_url()).await?;
        self.set_discovery(document.clone());
        Ok(document)
    }

    // ========== Authorization Request ==========

    /// Build the login URL for a fresh attempt and record it as current.
    ///
    /// Returns `None` until discovery has produced a usable authorization
    /// endpoint.
    pub fn authorization_request(&self) -> Option<AuthorizationRequest> {
        let discovery = self.discovery();
        let request = build_authorization_request(&self.config, &discovery, &self.pkce)?;
        if self.attempts.record(request.attempt.clone()).is_some() {
            tracing::debug!("Replacing previous authorization attempt");
        }
        Some(request)
    }

    /// The attempt produced by the last [`authorization_request`](Self::authorization_request).
    pub fn current_attempt(&self) -> Option<AuthorizationAttempt> {
        self.attempts.current()
    }

    /// Extract the authorization code from a redirect URL.
    pub fn parse_redirect(&self, redirect_url: &str) -> OidcResult<String> {
        parse_authorization_code_str(redirect_url)
    }

    // ========== Token Grants ==========

    fn code_flow(&self) -> AuthorizationCodeFlowImpl<T> {
        AuthorizationCodeFlowImpl::new(
            Arc::clone(&self.config),
            self.token_endpoint(),
            Arc::clone(&self.transport),
        )
    }

    fn refresh_flow(&self) -> RefreshTokenFlowImpl<T> {
        RefreshTokenFlowImpl::new(
            Arc::clone(&self.config),
            self.token_endpoint(),
            Arc::clone(&self.transport),
        )
    }

    fn password_flow(&self) -> PasswordFlowImpl<T> {
        PasswordFlowImpl::new(
            Arc::clone(&self.config),
            self.token_endpoint(),
            Arc::clone(&self.transport),
        )
    }

    /// Exchange an authorization code using the instance's verifier.
    pub async fn exchange_code(&self, code: &str, basic_auth: bool) -> OidcResult<TokenResponse> {
        self.code_flow()
            .exchange_code(code, &self.pkce.code_verifier, basic_auth)
            .await
    }

    /// Exchange an authorization code for a specific attempt.
    pub async fn exchange_code_for_attempt(
        &self,
        attempt: &AuthorizationAttempt,
        code: &str,
        basic_auth: bool,
    ) -> OidcResult<TokenResponse> {
        self.code_flow()
            .exchange_code(code, attempt.code_verifier(), basic_auth)
            .await
    }

    /// Parse the redirect URL and exchange the code it carries.
    pub async fn exchange_redirect(
        &self,
        redirect_url: &str,
        basic_auth: bool,
    ) -> OidcResult<TokenResponse> {
        let code = self.parse_redirect(redirect_url)?;
        self.exchange_code(&code, basic_auth).await
    }

    /// Exchange a refresh token for a new token set.
    pub async fn refresh_tokens(&self, refresh_token: &str) -> OidcResult<TokenResponse> {
        self.refresh_flow().refresh_tokens(refresh_token).await
    }

    /// Resource-owner password grant.
    pub async fn password_grant(
        &self,
        credentials: &PasswordCredentials,
    ) -> OidcResult<TokenResponse> {
        self.password_flow().password_grant(credentials).await
    }

    /// Resource-owner password grant accepting caller-chosen 401 bodies.
    pub async fn password_grant_with_overrides(
        &self,
        credentials: &PasswordCredentials,
        basic_auth: bool,
        override_errors: &[String],
    ) -> OidcResult<GrantOutcome> {
        self.password_flow()
            .password_grant_with_overrides(credentials, basic_auth, override_errors)
            .await
    }
}

impl<T: HttpTransport + 'static> OidcClient<T> {
    /// Fetch the discovery document, blocking the calling thread.
    ///
    /// A malformed discovery URL is logged and leaves the endpoints
    /// untouched. Must not be called from inside an async task.
    pub fn discover_blocking(&self) -> OidcResult<()> {
        let discovery_url = self.config.discovery_url();
        if Url::parse(discovery_url).is_err() {
            tracing::warn!(discovery_url, "Malformed discovery URL; endpoints not loaded");
            return Ok(());
        }

        let resolver = DefaultDiscoveryResolver::new(Arc::clone(&self.transport));
        let document = resolver.resolve_blocking(discovery_url)?;
        self.set_discovery(document);
        Ok(())
    }

    // ========== Callback Style ==========
    //
    // Each `spawn_*` operation returns immediately and reports through the
    // notifier. Must be called from within a tokio runtime.

    /// Run discovery in the background. Failures are reported to `notifier`.
    pub fn spawn_discover(
        &self,
        notifier: &ResultNotifier,
    ) -> JoinHandle<OidcResult<DiscoveryDocument>> {
        let client = self.clone();
        let notifier = notifier.clone();
        tokio::spawn(async move {
            let result = client.discover().await;
            if let Err(error) = &result {
                notifier.auth_failure(error.clone());
            }
            result
        })
    }

    /// Exchange a code in the background.
    pub fn spawn_exchange_code(
        &self,
        code: impl Into<String>,
        basic_auth: bool,
        notifier: &ResultNotifier,
    ) -> JoinHandle<()> {
        let client = self.clone();
        let notifier = notifier.clone();
        let code = code.into();
        tokio::spawn(async move {
            let result = client.exchange_code(&code, basic_auth).await;
            notifier.notify(AuthOutcome::from(result));
        })
    }

    /// Parse a redirect and exchange its code in the background.
    pub fn spawn_exchange_redirect(
        &self,
        redirect_url: impl Into<String>,
        basic_auth: bool,
        notifier: &ResultNotifier,
    ) -> JoinHandle<()> {
        let client = self.clone();
        let notifier = notifier.clone();
        let redirect_url = redirect_url.into();
        tokio::spawn(async move {
            let result = client.exchange_redirect(&redirect_url, basic_auth).await;
            notifier.notify(AuthOutcome::from(result));
        })
    }

    /// Refresh tokens in the background.
    pub fn spawn_refresh_tokens(
        &self,
        refresh_token: impl Into<String>,
        notifier: &ResultNotifier,
    ) -> JoinHandle<()> {
        let client = self.clone();
        let notifier = notifier.clone();
        let refresh_token = refresh_token.into();
        tokio::spawn(async move {
            let result = client.refresh_tokens(&refresh_token).await;
            notifier.notify(AuthOutcome::from(result));
        })
    }

    /// Password grant in the background.
    pub fn spawn_password_grant(
        &self,
        credentials: PasswordCredentials,
        notifier: &ResultNotifier,
    ) -> JoinHandle<()> {
        let client = self.clone();
        let notifier = notifier.clone();
        tokio::spawn(async move {
            let result = client.password_grant(&credentials).await;
            notifier.notify(AuthOutcome::from(result));
        })
    }

    /// Password grant with override bodies in the background.
    ///
    /// An override body is reported through
    /// [`ResultNotifier::ropg_success`].
    pub fn spawn_password_grant_with_overrides(
        &self,
        credentials: PasswordCredentials,
        basic_auth: bool,
        override_errors: Vec<String>,
        notifier: &ResultNotifier,
    ) -> JoinHandle<()> {
        let client = self.clone();
        let notifier = notifier.clone();
        tokio::spawn(async move {
            let result = client
                .password_grant_with_overrides(&credentials, basic_auth, &override_errors)
                .await;
            notifier.notify(AuthOutcome::from(result));
        })
    }
}

/// Create a client with the default transport.
pub fn oidc_client(config: ClientConfiguration) -> OidcResult<OidcClient> {
    OidcClient::new(config)
}
