//! `GET /health`: probes the link store and the rate limiter backend.
//!
//! Answers 200 when both respond and 503 otherwise, with the same body shape
//! in both cases.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{HealthResponse, Probe, Probes, ServiceStatus};
use crate::state::AppState;

pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (storage, rate_limiter) = tokio::join!(probe_storage(&state), probe_rate_limiter(&state));
    let response = HealthResponse::from_probes(Probes {
        storage,
        rate_limiter,
    });

    let status = match response.status {
        ServiceStatus::Healthy => StatusCode::OK,
        ServiceStatus::Degraded => {
            tracing::warn!(checks = ?response.checks, "Health check degraded");
            StatusCode::SERVICE_UNAVAILABLE
        }
    };
    (status, Json(response))
}

async fn probe_storage(state: &AppState) -> Probe {
    state
        .link_service
        .ping()
        .await
        .map_or_else(|e| Probe::failed(format!("Storage error: {e}")), |()| {
            Probe::passed("Link store reachable")
        })
}

async fn probe_rate_limiter(state: &AppState) -> Probe {
    let backend = state.rate_limiter.backend();
    if state.rate_limiter.health_check().await {
        Probe::passed(format!("Backend: {backend}"))
    } else {
        Probe::failed(format!("Backend {backend} unreachable"))
    }
}
