pub(crate) mod oauth_controller;

use axum::http::{header, HeaderMap};

/// Reconstruct `scheme://host` for the incoming request.
///
/// Browser redirects land here straight from the provider, so the original
/// scheme is only visible through a reverse proxy's x-forwarded-proto
/// header; plain http is assumed without one.
pub(crate) fn request_base_url(headers: &HeaderMap) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("http");
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost");
    format!("{scheme}://{host}")
}
