//! OAuth authentication gateway.
//!
//! Authorization-code login flows for the supported identity providers.

pub mod client;
pub mod provider;

pub use client::{ClientOptions, OauthClient, TokenResponse, UserInfo};
pub use provider::{ProviderKind, ProviderUrls};

/// Split a full redirect URL into `(code, state, base_url_without_query)`.
///
/// `code` and `state` default to the empty string when the query parameter is
/// absent. Pure string parsing, no network or state access; this lets callers
/// reconstruct the redirect exchange when the code arrives outside the
/// router's own query parsing (a pasted URL, an out-of-band flow).
pub fn decode(code_url: &str) -> (String, String, String) {
    let mut parts = code_url.splitn(2, '?');
    let base_url = parts.next().unwrap_or_default().to_string();
    let query = parts.next().unwrap_or_default();

    let mut code = String::new();
    let mut state = String::new();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            // First occurrence wins, matching standard query-string parsing.
            "code" if code.is_empty() => code = value.into_owned(),
            "state" if state.is_empty() => state = value.into_owned(),
            _ => {}
        }
    }

    (code, state, base_url)
}
