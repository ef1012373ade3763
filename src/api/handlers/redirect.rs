//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::error;
use url::Url;

use crate::application::services::Resolution;
use crate::state::AppState;
use crate::web::pages;

/// Resolves a short code and redirects to its destination.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Responses
///
/// - **307 Temporary Redirect** to the destination, with caching disabled
///   since the link may expire or run out of clicks at any time
/// - **404** page for unknown or malformed codes
/// - **410** page for expired or used-up links
/// - **500** page if the store fails
///
/// A click is counted only on redirect. Password protected links redirect
/// as well; the password challenge is a separate endpoint.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Response {
    match state.link_service.resolve(&code).await {
        Ok(Resolution::Redirect(link)) => redirect_to(&link.destination, &state.home_url),
        Ok(Resolution::NotFound) => pages::not_found(&state.home_url),
        Ok(Resolution::Expired(link)) => pages::expired(&state.home_url, &link),
        Ok(Resolution::QuotaExceeded(link)) => pages::exhausted(&state.home_url, &link),
        Err(e) => {
            error!(code = %code, error = %e, "Failed to resolve short code");
            pages::error(&state.home_url)
        }
    }
}

/// Uncacheable temporary redirect.
fn redirect_to(destination: &str, home_url: &str) -> Response {
    // Non-ASCII destinations go out percent-encoded.
    let location = if destination.is_ascii() {
        HeaderValue::from_str(destination).ok()
    } else {
        Url::parse(destination)
            .ok()
            .and_then(|url| HeaderValue::from_str(url.as_str()).ok())
    };

    let Some(location) = location else {
        error!(destination, "Stored destination is not a valid Location header");
        return pages::error(home_url);
    };

    (
        StatusCode::TEMPORARY_REDIRECT,
        [
            (header::LOCATION, location),
            (
                header::CACHE_CONTROL,
                HeaderValue::from_static("no-cache, no-store, must-revalidate"),
            ),
            (header::PRAGMA, HeaderValue::from_static("no-cache")),
            (header::EXPIRES, HeaderValue::from_static("0")),
        ],
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_headers() {
        let response = redirect_to("https://example.com/a?b=c", "/");

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://example.com/a?b=c"
        );
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "no-cache, no-store, must-revalidate"
        );
        assert_eq!(response.headers()[header::PRAGMA], "no-cache");
        assert_eq!(response.headers()[header::EXPIRES], "0");
    }

    #[test]
    fn test_non_ascii_destination_is_percent_encoded() {
        let response = redirect_to("https://example.com/caf\u{e9}", "/");

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://example.com/caf%C3%A9"
        );
    }
}
