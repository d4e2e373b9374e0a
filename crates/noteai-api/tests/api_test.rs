//! End-to-end tests against a spawned server.
//!
//! The enrichment provider is scripted and notes live in memory, so these
//! tests need no network access or database.

use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{json, Value};

use noteai_api::{build_router, AppState, ServerConfig};
use noteai_core::{Enricher, NoteRepository};
use noteai_db::MemoryNoteRepository;
use noteai_inference::mock::ScriptedProvider;
use noteai_inference::EnrichmentClient;

const MODELS: [&str; 3] = ["m1", "m2", "m3"];

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    state: AppState,
}

async fn spawn(notes: Arc<dyn NoteRepository>, provider: Option<ScriptedProvider>) -> TestServer {
    let enricher = provider.map(|p| {
        let client = EnrichmentClient::new(p, MODELS.iter().map(|m| m.to_string()).collect());
        Arc::new(client) as Arc<dyn Enricher>
    });
    let state = AppState::new(notes, enricher);
    let router = build_router(state.clone(), &ServerConfig::default());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{}", addr),
        client: reqwest::Client::new(),
        state,
    }
}

async fn spawn_default(provider: Option<ScriptedProvider>) -> TestServer {
    spawn(Arc::new(MemoryNoteRepository::new()), provider).await
}

impl TestServer {
    async fn post_ai(&self, body: &str) -> (StatusCode, Value) {
        let response = self
            .client
            .post(format!("{}/api/ai", self.base_url))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }

    async fn send_json(&self, method: reqwest::Method, path: &str, body: Value) -> (StatusCode, Value) {
        let response = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }
}

// -- /api/ai --

#[tokio::test]
async fn test_ai_returns_parsed_result() {
    let provider = ScriptedProvider::new()
        .with_response("m1", "```json\n{\"summary\":\"Groceries\",\"tags\":[\"food\",\"todo\"]}\n```");
    let server = spawn_default(Some(provider.clone())).await;

    let (status, body) = server.post_ai(r#"{"content":"milk, eggs"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"summary": "Groceries", "tags": ["food", "todo"]}));
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_ai_degraded_result() {
    let text = "Hello world, this is a summary of your note...";
    let server = spawn_default(Some(ScriptedProvider::new().with_response("m1", text))).await;

    let (status, body) = server.post_ai(r#"{"content":"anything"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"], format!("{}...", text));
    assert_eq!(body["tags"], json!([]));
}

#[tokio::test]
async fn test_ai_missing_content_is_400_before_key_check() {
    let server = spawn_default(None).await;

    for body in [r#"{}"#, r#"{"content":""}"#, r#"{"content":null}"#] {
        let (status, json) = server.post_ai(body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert!(json["error"].is_string());
        assert!(json.get("details").is_none());
    }
}

#[tokio::test]
async fn test_ai_whitespace_content_is_400_without_provider_call() {
    let provider = ScriptedProvider::new().with_default_response("{}");
    let server = spawn_default(Some(provider.clone())).await;

    let (status, _) = server.post_ai(r#"{"content":"   "}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_ai_whitespace_content_without_key_is_400() {
    let server = spawn_default(None).await;

    for body in [r#"{"content":"   "}"#, r#"{"content":"\n\t "}"#] {
        let (status, json) = server.post_ai(body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(json["error"], "Content is required");
    }
}

#[tokio::test]
async fn test_ai_without_key_is_500() {
    let server = spawn_default(None).await;

    let (status, body) = server.post_ai(r#"{"content":"note"}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "API key not configured");
}

#[tokio::test]
async fn test_ai_quota_is_429_with_details() {
    let provider = ScriptedProvider::new()
        .with_error("m1", 429, "Resource has been exhausted")
        .with_error("m2", 404, "model not found");
    let server = spawn_default(Some(provider)).await;

    let (status, body) = server.post_ai(r#"{"content":"note"}"#).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert!(body["error"].is_string());
    // m3 is unscripted and answers with the default 404
    assert!(body["details"].as_str().unwrap().starts_with("[404]"));
}

#[tokio::test]
async fn test_ai_all_unavailable_is_500_with_details() {
    let provider = ScriptedProvider::new().with_default_error(404, "model not found");
    let server = spawn_default(Some(provider)).await;

    let (status, body) = server.post_ai(r#"{"content":"note"}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["details"], "[404] model not found");
}

#[tokio::test]
async fn test_ai_malformed_body_is_500_with_details() {
    let server = spawn_default(None).await;

    let (status, body) = server.post_ai("{not json").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
    assert!(body["details"].is_string());
}

// -- /api/notes --

#[tokio::test]
async fn test_note_crud_round() {
    let server = spawn_default(None).await;
    let mut events = server.state.events.subscribe();

    let (status, created) = server
        .send_json(
            reqwest::Method::POST,
            "/api/notes",
            json!({"title": "First", "content": "# Hello", "summary": "Greeting", "tags": ["intro"]}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["metadata_dropped"], false);
    assert_eq!(created["note"]["summary"], "Greeting");
    let id = created["note"]["id"].as_str().unwrap().to_string();
    assert_eq!(events.recv().await.unwrap().event_type(), "note.created");

    let (status, _) = server
        .send_json(
            reqwest::Method::POST,
            "/api/notes",
            json!({"title": "Second", "content": "body"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let listed: Vec<Value> = server
        .client
        .get(format!("{}/api/notes", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let titles: Vec<&str> = listed.iter().map(|n| n["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Second", "First"]);

    let (status, updated) = server
        .send_json(
            reqwest::Method::PUT,
            &format!("/api/notes/{}", id),
            json!({"title": "First (edited)", "content": "# Hello again"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["note"]["title"], "First (edited)");
    assert_eq!(updated["note"]["summary"], "Greeting");

    let response = server
        .client
        .delete(format!("{}/api/notes/{}", server.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = server
        .client
        .get(format!("{}/api/notes/{}", server.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Deleting again still succeeds.
    let response = server
        .client
        .delete(format!("{}/api/notes/{}", server.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_create_with_blank_title_is_400() {
    let notes = Arc::new(MemoryNoteRepository::new());
    let server = spawn(notes.clone(), None).await;

    let (status, body) = server
        .send_json(
            reqwest::Method::POST,
            "/api/notes",
            json!({"title": "  ", "content": "valid text"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Title is required");
    assert!(notes.is_empty().await);
}

#[tokio::test]
async fn test_create_without_enrichment_columns_drops_metadata() {
    let notes = Arc::new(MemoryNoteRepository::without_enrichment_columns());
    let server = spawn(notes.clone(), None).await;

    let (status, body) = server
        .send_json(
            reqwest::Method::POST,
            "/api/notes",
            json!({"title": "T", "content": "C", "summary": "S", "tags": ["a"]}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["metadata_dropped"], true);
    assert!(body["note"].get("summary").is_none());
    assert_eq!(notes.len().await, 1);
}

#[tokio::test]
async fn test_update_unknown_note_is_404() {
    let server = spawn_default(None).await;

    let (status, body) = server
        .send_json(
            reqwest::Method::PUT,
            &format!("/api/notes/{}", uuid::Uuid::new_v4()),
            json!({"title": "T", "content": "C"}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_update_replaces_whole_note_via_put_only() {
    let server = spawn_default(None).await;
    let (_, created) = server
        .send_json(
            reqwest::Method::POST,
            "/api/notes",
            json!({"title": "T", "content": "C", "summary": "S", "tags": ["a"]}),
        )
        .await;
    let path = format!("/api/notes/{}", created["note"]["id"].as_str().unwrap());

    let response = server
        .client
        .patch(format!("{}{}", server.base_url, path))
        .json(&json!({"title": "T2"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let response = server
        .client
        .put(format!("{}{}", server.base_url, path))
        .json(&json!({"title": "T2"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let (status, updated) = server
        .send_json(reqwest::Method::PUT, &path, json!({"title": "T2", "content": "C2"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["note"]["title"], "T2");
    assert_eq!(updated["note"]["content"], "C2");
}
