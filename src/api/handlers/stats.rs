//! Handler for per-link statistics.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use crate::api::dto::stats::{StatsQuery, StatsResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the counters and lifecycle flags of one link.
///
/// # Endpoint
///
/// `GET /api/stats?code={code}`
///
/// Viewing statistics never counts a click, and expired or used-up links are
/// still reported.
///
/// # Errors
///
/// - 400 Bad Request for a missing or malformed code
/// - 404 Not Found if no link has this code
pub async fn stats_handler(
    State(state): State<AppState>,
    query: Result<Query<StatsQuery>, QueryRejection>,
) -> Result<Json<StatsResponse>, AppError> {
    let Query(query) = query?;
    let link = state.link_service.stats(&query.code).await?;

    Ok(Json(link.into()))
}
