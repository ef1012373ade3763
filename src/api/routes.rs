//! API route configuration.
//!
//! Mounted under `/api`. Only the admin routes require a bearer token, see
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    check_code_handler, delete_link_handler, shorten_handler, stats_handler, variants_handler,
    verify_password_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Public API routes.
///
/// # Endpoints
///
/// - `POST /shorten`          - Create a short link (rate limited)
/// - `POST /check-code`       - Check whether a code is taken
/// - `POST /variants`         - Ranked links sharing a destination
/// - `GET  /stats`            - Counters of one link (`?code=`)
/// - `POST /verify-password`  - Password challenge of a protected link
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/check-code", post(check_code_handler))
        .route("/variants", post(variants_handler))
        .route("/stats", get(stats_handler))
        .route("/verify-password", post(verify_password_handler))
}

/// Admin routes, to be wrapped in the bearer token layer.
///
/// # Endpoints
///
/// - `DELETE /links/{code}`   - Delete a link
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/links/{code}", delete(delete_link_handler))
}
