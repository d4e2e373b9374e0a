//! Core traits for NoteAI abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{ProviderError, Result};
use crate::models::*;

// =============================================================================
// NOTE REPOSITORY TRAITS
// =============================================================================

/// Repository for note CRUD operations.
///
/// Implementations must report a write that references the missing optional
/// `summary`/`tags` columns as [`crate::Error::SchemaMismatch`], so callers
/// never depend on a particular store's error vocabulary.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a new note and return it with its store-assigned fields.
    async fn insert(&self, req: SaveNoteRequest) -> Result<Note>;

    /// Replace title/content (and enrichment, when present) of an existing note.
    async fn update(&self, id: Uuid, req: SaveNoteRequest) -> Result<Note>;

    /// Delete a note. Deleting an id that does not exist succeeds.
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// Fetch a single note.
    async fn fetch(&self, id: Uuid) -> Result<Note>;

    /// All notes, newest first.
    async fn list(&self) -> Result<Vec<Note>>;
}

// =============================================================================
// INFERENCE TRAITS
// =============================================================================

/// A generative-AI provider addressed by model identifier.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generate a text response for `prompt` using `model`.
    async fn generate(&self, model: &str, prompt: &str)
        -> std::result::Result<String, ProviderError>;

    /// Provider name for logs.
    fn provider_name(&self) -> &str;
}

/// Produces summary and tags for note content.
#[async_trait]
pub trait Enricher: Send + Sync {
    async fn enrich(&self, content: &str) -> Result<Enrichment>;
}

#[async_trait]
impl<T: NoteRepository + ?Sized> NoteRepository for std::sync::Arc<T> {
    async fn insert(&self, req: SaveNoteRequest) -> Result<Note> {
        (**self).insert(req).await
    }

    async fn update(&self, id: Uuid, req: SaveNoteRequest) -> Result<Note> {
        (**self).update(id, req).await
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        (**self).delete(id).await
    }

    async fn fetch(&self, id: Uuid) -> Result<Note> {
        (**self).fetch(id).await
    }

    async fn list(&self) -> Result<Vec<Note>> {
        (**self).list().await
    }
}

#[async_trait]
impl<T: Enricher + ?Sized> Enricher for std::sync::Arc<T> {
    async fn enrich(&self, content: &str) -> Result<Enrichment> {
        (**self).enrich(content).await
    }
}
