//! `POST /api/ai`: summary and tags for note content.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use noteai_core::EnrichmentResult;

use crate::error::{ApiError, ErrorBody};
use crate::AppState;

/// Enrichment request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct EnrichRequest {
    /// Note content to summarize and tag.
    pub content: String,
}

#[utoipa::path(post, path = "/api/ai", tag = "AI",
    request_body = EnrichRequest,
    responses(
        (status = 200, description = "Summary and tags", body = EnrichmentResult),
        (status = 400, description = "Missing content", body = ErrorBody),
        (status = 429, description = "Every model failed, at least one on quota", body = ErrorBody),
        (status = 500, description = "Not configured or every model failed", body = ErrorBody),
    )
)]
pub async fn enrich(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<EnrichmentResult>, ApiError> {
    let payload: Value = serde_json::from_slice(&body).map_err(|e| ApiError::Unexpected {
        details: e.to_string(),
    })?;

    let content = payload
        .get("content")
        .and_then(Value::as_str)
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Content is required".to_string()))?;

    let enricher = state
        .enricher
        .as_ref()
        .ok_or_else(|| ApiError::Internal("API key not configured".to_string()))?;

    let enrichment = enricher.enrich(content).await?;
    Ok(Json(enrichment.result))
}
