//! Handler for code availability checks.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::api::dto::check_code::{CheckCodeRequest, CheckCodeResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Reports whether a code is already taken.
///
/// # Endpoint
///
/// `POST /api/check-code`
///
/// # Errors
///
/// Returns 400 Bad Request if the code is not six alphanumeric characters.
pub async fn check_code_handler(
    State(state): State<AppState>,
    payload: Result<Json<CheckCodeRequest>, JsonRejection>,
) -> Result<Json<CheckCodeResponse>, AppError> {
    let Json(payload) = payload?;
    let exists = state.link_service.check_code(&payload.code).await?;

    Ok(Json(CheckCodeResponse { exists }))
}
