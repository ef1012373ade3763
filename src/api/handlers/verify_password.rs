//! Handler for the password challenge of protected links.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::api::dto::verify_password::{VerifyPasswordRequest, VerifyPasswordResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Checks a password and reveals the destination when it matches.
///
/// # Endpoint
///
/// `POST /api/verify-password`
///
/// Does not count a click.
///
/// # Errors
///
/// - 400 Bad Request for a malformed code
/// - 404 Not Found if no link has this code
/// - 410 Gone if the link is expired or used up
/// - 403 Forbidden if the password does not match
pub async fn verify_password_handler(
    State(state): State<AppState>,
    payload: Result<Json<VerifyPasswordRequest>, JsonRejection>,
) -> Result<Json<VerifyPasswordResponse>, AppError> {
    let Json(payload) = payload?;
    let link = state
        .link_service
        .verify_password(&payload.code, &payload.password)
        .await?;

    Ok(Json(VerifyPasswordResponse {
        valid: true,
        destination: link.destination,
    }))
}
