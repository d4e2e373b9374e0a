//! Health check.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Whether an AI provider key is configured.
    pub enrichment_configured: bool,
}

#[utoipa::path(get, path = "/health", tag = "System",
    responses((status = 200, description = "Service is healthy", body = HealthResponse)))]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        enrichment_configured: state.enricher.is_some(),
    })
}
