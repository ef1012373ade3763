//! Handler for link creation.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tracing::info;
use validator::Validate;

use crate::api::dto::create_link::{CreateLinkRequest, CreateLinkResponse};
use crate::api::middleware::rate_limit;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_identity::client_identity;

/// Creates one short link.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "code": "Promo1",
///   "destination": "https://example.com/landing",
///   "expiresIn": "7d",
///   "maxClicks": 100,
///   "password": "correct horse"
/// }
/// ```
///
/// Only `destination` is required.
///
/// # Request Flow
///
/// 1. Validate the input (no quota consumed for malformed requests)
/// 2. Admission check for the caller's identity
/// 3. Safety verdict, password hashing and code allocation
///
/// Every response past step 2 carries the `X-RateLimit-*` headers.
///
/// # Errors
///
/// - 400 for invalid input or a taken code
/// - 403 if the destination is flagged as unsafe
/// - 429 when the caller's window is used up
/// - 503 if no free code could be generated
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let draft = state.link_service.validate_input(payload.into())?;

    let identity = client_identity(&headers);
    let decision = state.rate_limiter.check(&identity).await;
    let now = Utc::now();
    let rate_headers = rate_limit::headers(&decision, now);

    if !decision.allowed {
        metrics::counter!("linkgate_rate_limited_total").increment(1);
        info!(%identity, reset_at = %decision.reset_at, "Rate limit exceeded");
        return Ok((rate_headers, rate_limit::rejection(&decision, now)).into_response());
    }

    let response = match state.link_service.create_link(draft).await {
        Ok(link) => (
            rate_headers,
            Json(CreateLinkResponse {
                short_url: state.link_service.short_url(&link.code),
                code: link.code,
            }),
        )
            .into_response(),
        Err(e) => (rate_headers, e).into_response(),
    };

    Ok(response)
}
