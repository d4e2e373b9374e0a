//! In-process note repository.
//!
//! Used when no `DATABASE_URL` is configured and by workflow/API tests. It
//! honours the same contract as the PostgreSQL repository, including the
//! schema-mismatch failure when built without enrichment columns.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use noteai_core::{Error, Note, NoteRepository, Result, SaveNoteRequest};

#[derive(Default)]
struct Inner {
    notes: Vec<Note>,
    last_created_at: Option<DateTime<Utc>>,
}

/// Note repository backed by a vector behind an async lock.
pub struct MemoryNoteRepository {
    inner: RwLock<Inner>,
    enrichment_columns: bool,
}

impl MemoryNoteRepository {
    /// Repository with the full schema.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            enrichment_columns: true,
        }
    }

    /// Repository whose schema lacks `summary`/`tags`.
    pub fn without_enrichment_columns() -> Self {
        Self {
            enrichment_columns: false,
            ..Self::new()
        }
    }

    /// Number of stored notes.
    pub async fn len(&self) -> usize {
        self.inner.read().await.notes.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_columns(&self, req: &SaveNoteRequest) -> Result<()> {
        if req.has_enrichment() && !self.enrichment_columns {
            let column = if req.summary.is_some() { "summary" } else { "tags" };
            return Err(Error::SchemaMismatch(format!(
                "column \"{}\" of relation \"notes\" does not exist",
                column
            )));
        }
        Ok(())
    }
}

impl Default for MemoryNoteRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Inner {
    /// Creation timestamps are strictly increasing so ordering is total.
    fn next_created_at(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let created_at = match self.last_created_at {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_created_at = Some(created_at);
        created_at
    }
}

#[async_trait]
impl NoteRepository for MemoryNoteRepository {
    async fn insert(&self, req: SaveNoteRequest) -> Result<Note> {
        self.check_columns(&req)?;
        let mut inner = self.inner.write().await;
        let note = Note {
            id: Uuid::now_v7(),
            title: req.title,
            content: req.content,
            created_at: inner.next_created_at(),
            summary: req.summary,
            tags: req.tags,
        };
        inner.notes.push(note.clone());
        Ok(note)
    }

    async fn update(&self, id: Uuid, req: SaveNoteRequest) -> Result<Note> {
        self.check_columns(&req)?;
        let mut inner = self.inner.write().await;
        let note = inner
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| Error::NotFound(format!("note {}", id)))?;

        let with_enrichment = req.has_enrichment();
        note.title = req.title;
        note.content = req.content;
        if with_enrichment {
            note.summary = req.summary;
            note.tags = req.tags;
        }
        Ok(note.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.inner.write().await.notes.retain(|n| n.id != id);
        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> Result<Note> {
        self.inner
            .read()
            .await
            .notes
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("note {}", id)))
    }

    async fn list(&self) -> Result<Vec<Note>> {
        let mut notes = self.inner.read().await.notes.clone();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(notes)
    }
}
