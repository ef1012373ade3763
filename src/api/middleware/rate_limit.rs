//! Rate limit headers and rejection for the link creation path.
//!
//! The admission check itself runs inside the create handler, after input
//! validation, so malformed requests never consume quota.

use axum::http::{HeaderMap, HeaderName, HeaderValue, header::RETRY_AFTER};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::json;

use crate::error::AppError;
use crate::infrastructure::rate_limit::RateLimitDecision;

pub const X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
pub const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
pub const X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

/// Builds the `X-RateLimit-*` headers for a decision.
///
/// `Retry-After` (whole seconds) is added only when the request was denied.
pub fn headers(decision: &RateLimitDecision, now: DateTime<Utc>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(X_RATELIMIT_LIMIT, HeaderValue::from(decision.limit));
    headers.insert(X_RATELIMIT_REMAINING, HeaderValue::from(decision.remaining));

    let reset = decision
        .reset_at
        .to_rfc3339_opts(SecondsFormat::Secs, true);
    if let Ok(value) = HeaderValue::from_str(&reset) {
        headers.insert(X_RATELIMIT_RESET, value);
    }

    if !decision.allowed {
        headers.insert(
            RETRY_AFTER,
            HeaderValue::from(decision.retry_after_secs(now)),
        );
    }

    headers
}

/// Error returned to a denied caller.
pub fn rejection(decision: &RateLimitDecision, now: DateTime<Utc>) -> AppError {
    AppError::rate_limited(
        "Too many requests, please try again later",
        json!({
            "limit": decision.limit,
            "remaining": decision.remaining,
            "resetAt": decision.reset_at,
            "retryAfter": decision.retry_after_secs(now),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn decision(allowed: bool, remaining: u32) -> RateLimitDecision {
        RateLimitDecision {
            allowed,
            limit: 10,
            remaining,
            reset_at: Utc.with_ymd_and_hms(2025, 1, 1, 12, 1, 0).unwrap(),
        }
    }

    #[test]
    fn test_headers_when_allowed() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let headers = headers(&decision(true, 7), now);

        assert_eq!(headers[&X_RATELIMIT_LIMIT], "10");
        assert_eq!(headers[&X_RATELIMIT_REMAINING], "7");
        assert_eq!(headers[&X_RATELIMIT_RESET], "2025-01-01T12:01:00Z");
        assert!(headers.get(RETRY_AFTER).is_none());
    }

    #[test]
    fn test_retry_after_when_denied() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap() + Duration::milliseconds(500);
        let headers = headers(&decision(false, 0), now);

        assert_eq!(headers[&X_RATELIMIT_REMAINING], "0");
        assert_eq!(headers[RETRY_AFTER], "60");
    }

    #[test]
    fn test_rejection_is_429() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 30).unwrap();
        let error = rejection(&decision(false, 0), now);

        assert_eq!(error.status_code(), axum::http::StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(error.to_error_info().details["retryAfter"], 30);
    }
}
