//! Note CRUD.
//!
//! Creates and updates go through [`persist_note`], so a store without the
//! enrichment columns still accepts the note and reports
//! `metadata_dropped: true`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use noteai_core::{Note, NoteEvent, SaveNoteRequest, SaveTarget};
use noteai_workflow::persist_note;

use crate::error::{ApiError, ErrorBody};
use crate::AppState;

/// Result of a create or update.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SaveNoteResponse {
    pub note: Note,
    /// Saved, but summary/tags were dropped because the store lacks the columns.
    pub metadata_dropped: bool,
}

#[utoipa::path(get, path = "/api/notes", tag = "Notes",
    responses((status = 200, description = "All notes, newest first", body = [Note])))]
pub async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<Note>>, ApiError> {
    Ok(Json(state.notes.list().await?))
}

#[utoipa::path(post, path = "/api/notes", tag = "Notes",
    request_body = SaveNoteRequest,
    responses(
        (status = 201, description = "Created", body = SaveNoteResponse),
        (status = 400, description = "Empty title or content", body = ErrorBody),
    )
)]
pub async fn create_note(
    State(state): State<AppState>,
    Json(req): Json<SaveNoteRequest>,
) -> Result<(StatusCode, Json<SaveNoteResponse>), ApiError> {
    let response = save(&state, SaveTarget::Create, req).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(get, path = "/api/notes/{id}", tag = "Notes",
    params(("id" = Uuid, Path, description = "Note ID")),
    responses(
        (status = 200, description = "The note", body = Note),
        (status = 404, description = "Not found", body = ErrorBody),
    )
)]
pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Note>, ApiError> {
    Ok(Json(state.notes.fetch(id).await?))
}

#[utoipa::path(put, path = "/api/notes/{id}", tag = "Notes",
    params(("id" = Uuid, Path, description = "Note ID")),
    request_body = SaveNoteRequest,
    responses(
        (status = 200, description = "Updated", body = SaveNoteResponse),
        (status = 400, description = "Empty title or content", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody),
    )
)]
pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SaveNoteRequest>,
) -> Result<Json<SaveNoteResponse>, ApiError> {
    Ok(Json(save(&state, SaveTarget::Update(id), req).await?))
}

#[utoipa::path(delete, path = "/api/notes/{id}", tag = "Notes",
    params(("id" = Uuid, Path, description = "Note ID")),
    responses((status = 204, description = "Deleted (or never existed)")))]
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.notes.delete(id).await?;
    state.events.emit(NoteEvent::Deleted { note_id: id });
    Ok(StatusCode::NO_CONTENT)
}

async fn save(
    state: &AppState,
    target: SaveTarget,
    req: SaveNoteRequest,
) -> Result<SaveNoteResponse, ApiError> {
    let persisted = persist_note(state.notes.as_ref(), target, req).await?;
    state.events.emit(NoteEvent::Saved {
        note_id: persisted.note.id,
        created: matches!(target, SaveTarget::Create),
        metadata_dropped: persisted.metadata_dropped,
    });
    Ok(SaveNoteResponse {
        note: persisted.note,
        metadata_dropped: persisted.metadata_dropped,
    })
}
