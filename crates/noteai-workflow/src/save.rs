//! Note writes with the enrichment-column fallback.

use std::time::Instant;

use tracing::{info, warn};

use noteai_core::{Note, NoteRepository, Result, SaveNoteRequest, SaveTarget};

/// A successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persisted {
    pub note: Note,
    /// The write only went through after dropping summary/tags.
    pub metadata_dropped: bool,
}

/// Validate and write `request` to `target`.
///
/// A write rejected because the store lacks the enrichment columns is retried
/// exactly once without them. Any other failure, including a failed retry, is
/// returned as is. Validation failures issue no repository call.
pub async fn persist_note<R>(repo: &R, target: SaveTarget, request: SaveNoteRequest) -> Result<Persisted>
where
    R: NoteRepository + ?Sized,
{
    request.validate()?;
    let start = Instant::now();

    let first = write(repo, target, request.clone()).await;
    let (note, metadata_dropped) = match first {
        Ok(note) => (note, false),
        Err(e) if e.is_schema_mismatch() && request.has_enrichment() => {
            warn!(
                subsystem = "workflow",
                component = "save",
                error = %e,
                "Store rejected enrichment columns, retrying without summary/tags"
            );
            let note = write(repo, target, request.without_enrichment()).await?;
            (note, true)
        }
        Err(e) => return Err(e),
    };

    let op = match target {
        SaveTarget::Create => "create",
        SaveTarget::Update(_) => "update",
    };
    info!(
        subsystem = "workflow",
        component = "save",
        op,
        note_id = %note.id,
        metadata_dropped,
        duration_ms = start.elapsed().as_millis() as u64,
        "Note saved"
    );
    Ok(Persisted {
        note,
        metadata_dropped,
    })
}

async fn write<R>(repo: &R, target: SaveTarget, request: SaveNoteRequest) -> Result<Note>
where
    R: NoteRepository + ?Sized,
{
    match target {
        SaveTarget::Create => repo.insert(request).await,
        SaveTarget::Update(id) => repo.update(id, request).await,
    }
}
