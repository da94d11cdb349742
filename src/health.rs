use axum::{Json, extract::State};
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

use crate::app_state::AppState;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: String,
    cache_entries: usize,
    /// `configured` or `missing-api-key`.
    capability: String,
}

#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let capability = if state.service.capability_configured() {
        "configured"
    } else {
        "missing-api-key"
    };
    let cache_entries = state.service.cache().len();
    debug!(cache_entries, capability, "health check");

    Json(HealthResponse {
        status: "OK".to_string(),
        cache_entries,
        capability: capability.to_string(),
    })
}
