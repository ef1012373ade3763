//! Client identity extraction for admission control.

use axum::http::HeaderMap;

/// Headers consulted for the client address, highest priority first.
pub const FORWARDED_HEADERS: &[&str] = &["x-forwarded-for", "x-real-ip"];

/// Identity used when no forwarded address is present.
pub const UNKNOWN_IDENTITY: &str = "unknown";

/// Resolves the rate-limit identity of a request.
///
/// Uses the first present header of [`FORWARDED_HEADERS`]. For
/// `X-Forwarded-For` only the left-most (originating) entry is used. Falls back
/// to [`UNKNOWN_IDENTITY`], so all clients without the headers share one window.
pub fn client_identity(headers: &HeaderMap) -> String {
    FORWARDED_HEADERS
        .iter()
        .filter_map(|name| headers.get(*name))
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(',').next())
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_IDENTITY.to_string())
}
