//! Redirect Parsing
//!
//! Extracts the authorization code from the URL the user-agent was
//! redirected to.
//!
//! The query is scanned literally: segments are split on `&` and the value
//! after `code=` is returned still percent-encoded. A code whose encoded form
//! contains a raw `&` would be cut short; providers are assumed to emit
//! URL-safe codes.

use url::Url;

use crate::error::{OidcError, OidcResult};

const CODE_PREFIX: &str = "code=";
const ERROR_PREFIX: &str = "error=";

/// Extract the authorization code from a parsed redirect URL.
pub fn parse_authorization_code(redirect_url: &Url) -> OidcResult<String> {
    find_segment(redirect_url.query(), CODE_PREFIX).ok_or(OidcError::CodeNotFound)
}

/// Extract the authorization code from a redirect URL string.
///
/// An unparseable URL has no code.
pub fn parse_authorization_code_str(redirect_url: &str) -> OidcResult<String> {
    let url = Url::parse(redirect_url).map_err(|_| OidcError::CodeNotFound)?;
    parse_authorization_code(&url)
}

/// The `error=` value of a redirect, if the provider reported one.
pub fn redirect_error(redirect_url: &Url) -> Option<String> {
    find_segment(redirect_url.query(), ERROR_PREFIX)
}

fn find_segment(query: Option<&str>, prefix: &str) -> Option<String> {
    query?
        .split('&')
        .find_map(|segment| segment.strip_prefix(prefix))
        .map(str::to_string)
}
