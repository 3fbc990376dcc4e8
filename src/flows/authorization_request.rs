//! Authorization Request
//!
//! Builds the PKCE-protected login URL handed to the user-agent.

use url::Url;

use crate::core::new_attempt;
use crate::types::{
    AuthorizationAttempt, AuthorizationRequest, ClientConfiguration, DiscoveryDocument,
    PkceChallenge,
};

/// Build a login URL for a fresh attempt.
///
/// A new `state` and `nonce` are generated on every call. Returns `None`
/// when the discovery document has no usable authorization endpoint.
pub fn build_authorization_request(
    config: &ClientConfiguration,
    discovery: &DiscoveryDocument,
    pkce: &PkceChallenge,
) -> Option<AuthorizationRequest> {
    let attempt = new_attempt(pkce);
    let url = build_authorization_url(config, discovery, &attempt)?;
    Some(AuthorizationRequest { url, attempt })
}

/// Build the login URL for an existing attempt.
///
/// Parameter order: `client_id`, `response_type`, `scope`, the configured
/// additional parameters, `redirect_uri`, `state`, `code_challenge_method`,
/// `code_challenge`, `nonce`. The builder rejects additional parameters that
/// reuse one of these names, so each appears exactly once.
pub fn build_authorization_url(
    config: &ClientConfiguration,
    discovery: &DiscoveryDocument,
    attempt: &AuthorizationAttempt,
) -> Option<Url> {
    if discovery.authorization_endpoint.is_empty() {
        return None;
    }

    let mut url = Url::parse(&discovery.authorization_endpoint).ok()?;
    if url.cannot_be_a_base() {
        return None;
    }

    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("client_id", config.client_id())
            .append_pair("response_type", "code")
            .append_pair("scope", &config.scope_string());

        for (key, value) in config.additional_parameters() {
            query.append_pair(key, value);
        }

        query
            .append_pair("redirect_uri", config.redirect_uri())
            .append_pair("state", &attempt.state)
            .append_pair("code_challenge_method", attempt.pkce.method.as_str())
            .append_pair("code_challenge", &attempt.pkce.code_challenge)
            .append_pair("nonce", &attempt.nonce);
    }

    Some(url)
}
