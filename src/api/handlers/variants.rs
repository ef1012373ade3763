//! Handler for listing the links of one destination.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::api::dto::variants::{VariantItem, VariantsRequest, VariantsResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Lists the usable links pointing at a destination, best first.
///
/// # Endpoint
///
/// `POST /api/variants`
///
/// # Ordering
///
/// Links without a password come first, then links without a click limit,
/// then the most clicked. Only rank 1 of two or more variants is flagged
/// `isMostPopular`.
///
/// Expired and used-up links are left out of the response and deleted.
///
/// # Errors
///
/// Returns 400 Bad Request for an unacceptable destination.
pub async fn variants_handler(
    State(state): State<AppState>,
    payload: Result<Json<VariantsRequest>, JsonRejection>,
) -> Result<Json<VariantsResponse>, AppError> {
    let Json(payload) = payload?;
    let ranked = state
        .link_service
        .list_variants(&payload.destination)
        .await?;

    let variants = ranked
        .into_iter()
        .map(|variant| {
            let short_url = state.link_service.short_url(&variant.link.code);
            VariantItem::new(variant, short_url)
        })
        .collect();

    Ok(Json(VariantsResponse { variants }))
}
