//! # noteai-api
//!
//! HTTP surface for NoteAI: the enrichment endpoint, note CRUD, health and
//! the OpenAPI document.

pub mod config;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use uuid::Uuid;

use noteai_core::{defaults, Enricher, EventBus, NoteRepository};

pub use config::ServerConfig;
pub use error::ApiError;

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// STATE
// =============================================================================

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub notes: Arc<dyn NoteRepository>,
    /// `None` when no provider key is configured; `/api/ai` answers 500.
    pub enricher: Option<Arc<dyn Enricher>>,
    /// Note change notifications.
    pub events: EventBus,
}

impl AppState {
    pub fn new(notes: Arc<dyn NoteRepository>, enricher: Option<Arc<dyn Enricher>>) -> Self {
        Self {
            notes,
            enricher,
            events: EventBus::new(defaults::EVENT_BUS_CAPACITY),
        }
    }
}

// =============================================================================
// OPENAPI
// =============================================================================

#[derive(OpenApi)]
#[openapi(
    info(
        title = "NoteAI API",
        description = "Markdown notes with AI-generated summaries and tags"
    ),
    paths(
        handlers::ai::enrich,
        handlers::notes::list_notes,
        handlers::notes::create_note,
        handlers::notes::get_note,
        handlers::notes::update_note,
        handlers::notes::delete_note,
        handlers::health::health_check,
    ),
    components(schemas(
        noteai_core::Note,
        noteai_core::SaveNoteRequest,
        noteai_core::EnrichmentResult,
        handlers::ai::EnrichRequest,
        handlers::notes::SaveNoteResponse,
        handlers::health::HealthResponse,
        error::ErrorBody,
    )),
    tags(
        (name = "AI", description = "Summary and tag generation"),
        (name = "Notes", description = "Note CRUD operations"),
        (name = "System", description = "Health checks and system info")
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

// =============================================================================
// ROUTER
// =============================================================================

/// Build the application router with its middleware stack.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/openapi.json", get(openapi_json))
        .route("/api/ai", post(handlers::ai::enrich))
        .route(
            "/api/notes",
            get(handlers::notes::list_notes).post(handlers::notes::create_note),
        )
        .route(
            "/api/notes/:id",
            get(handlers::notes::get_note)
                .put(handlers::notes::update_note)
                .delete(handlers::notes::delete_note),
        )
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(config.cors_layer())
        .layer(RequestBodyLimitLayer::new(defaults::REQUEST_BODY_LIMIT))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use noteai_db::MemoryNoteRepository;
    use tower::ServiceExt;

    fn router(enricher: Option<Arc<dyn Enricher>>) -> Router {
        let state = AppState::new(Arc::new(MemoryNoteRepository::new()), enricher);
        build_router(state, &ServerConfig::default())
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_enrichment_configuration() {
        let response = router(None)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["enrichment_configured"], false);
    }

    #[tokio::test]
    async fn test_openapi_document_lists_routes() {
        let response = router(None)
            .oneshot(
                Request::builder()
                    .uri("/api/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json["paths"]["/api/ai"].is_object());
        assert!(json["paths"]["/api/notes/{id}"].is_object());
    }

    #[tokio::test]
    async fn test_request_id_is_propagated() {
        let response = router(None)
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("x-request-id", "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()["x-request-id"], "abc-123");
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let content = "x".repeat(defaults::REQUEST_BODY_LIMIT + 1);
        let body = serde_json::json!({ "content": content }).to_string();
        let response = router(None)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/ai")
                    .header("content-type", "application/json")
                    .header("content-length", body.len())
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
