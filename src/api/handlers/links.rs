//! Handlers for administrative link management.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// Requires the admin bearer token.
///
/// # Response
///
/// - 204 No Content on success
/// - 404 Not Found if the link does not exist
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.link_service.delete_link(&code).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(
            "Short link not found",
            json!({ "code": code }),
        ))
    }
}
