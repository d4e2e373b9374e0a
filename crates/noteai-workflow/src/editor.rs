//! Note editor session.
//!
//! ```text
//! Idle ──open──▶ Editing ──enrich──▶ Enriching ──▶ Editing
//!                   │  ▲
//!                 save └──── failure (values kept)
//!                   ▼
//!                Saving ──success──▶ Idle
//! ```
//!
//! `enrich` and `save` take `&mut self`, so a session can never run two of
//! them at once. The state check rejects calls made outside `Editing`.
//! Dropping an `enrich` or `save` future before it completes (a timeout, a
//! lost `select!` branch) puts the session back in `Editing`.

use tracing::{debug, info};
use uuid::Uuid;

use noteai_core::{
    Enricher, Enrichment, EnrichmentResult, Error, EventBus, Note, NoteEvent, NoteRepository,
    Result, SaveNoteRequest, SaveTarget,
};

use crate::save::persist_note;

/// Where an editor session is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Idle,
    Editing,
    Enriching,
    Saving,
}

/// In-progress values of an editing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub content: String,
    /// Summary/tags to write with the note.
    pub enrichment: Option<EnrichmentResult>,
    pub target: SaveTarget,
}

impl Draft {
    fn request(&self) -> SaveNoteRequest {
        let request = SaveNoteRequest::new(self.title.clone(), self.content.clone());
        match &self.enrichment {
            Some(enrichment) => request.with_enrichment(enrichment.clone()),
            None => request,
        }
    }
}

/// Result of a successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    pub note_id: Uuid,
    pub created: bool,
    /// Saved, but the AI summary/tags were dropped.
    pub metadata_dropped: bool,
}

/// Holds the session in a busy state until dropped, then returns it to
/// `Editing`.
struct BusyGuard<'a> {
    state: &'a mut EditorState,
}

impl<'a> BusyGuard<'a> {
    fn enter(state: &'a mut EditorState, busy: EditorState) -> Self {
        *state = busy;
        Self { state }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        *self.state = EditorState::Editing;
    }
}

/// One editing session over a repository and an enricher.
pub struct NoteEditor<R, E> {
    repo: R,
    enricher: E,
    events: EventBus,
    state: EditorState,
    draft: Option<Draft>,
}

impl<R, E> NoteEditor<R, E>
where
    R: NoteRepository,
    E: Enricher,
{
    pub fn new(repo: R, enricher: E, events: EventBus) -> Self {
        Self {
            repo,
            enricher,
            events,
            state: EditorState::Idle,
            draft: None,
        }
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    /// Current values, while a note is open.
    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    /// Start a new, empty note.
    pub fn open_new(&mut self) -> Result<()> {
        self.open(Draft {
            title: String::new(),
            content: String::new(),
            enrichment: None,
            target: SaveTarget::Create,
        })
    }

    /// Start editing an existing note.
    pub fn open_existing(&mut self, note: &Note) -> Result<()> {
        self.open(Draft {
            title: note.title.clone(),
            content: note.content.clone(),
            enrichment: note.enrichment(),
            target: SaveTarget::Update(note.id),
        })
    }

    fn open(&mut self, draft: Draft) -> Result<()> {
        self.ensure_not_busy()?;
        debug!(
            subsystem = "workflow",
            component = "editor",
            save_target = ?draft.target,
            "Editor opened"
        );
        self.draft = Some(draft);
        self.state = EditorState::Editing;
        Ok(())
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<()> {
        self.editing_draft()?.title = title.into();
        Ok(())
    }

    pub fn set_content(&mut self, content: impl Into<String>) -> Result<()> {
        self.editing_draft()?.content = content.into();
        Ok(())
    }

    /// Whether the enrichment trigger is available.
    pub fn can_enrich(&self) -> bool {
        self.state == EditorState::Editing
            && self
                .draft
                .as_ref()
                .is_some_and(|d| !d.content.trim().is_empty())
    }

    /// Whether the save trigger is available.
    pub fn can_save(&self) -> bool {
        self.state == EditorState::Editing
            && self.draft.as_ref().is_some_and(|d| d.request().validate().is_ok())
    }

    /// Generate summary/tags for the current content.
    ///
    /// On success (degraded or not) the draft's enrichment is replaced. On
    /// failure it is left untouched.
    pub async fn enrich(&mut self) -> Result<Enrichment> {
        let content = self.editing_draft()?.content.clone();

        let result = {
            let _busy = BusyGuard::enter(&mut self.state, EditorState::Enriching);
            self.enricher.enrich(&content).await
        };

        let enrichment = result?;
        if let Some(draft) = self.draft.as_mut() {
            draft.enrichment = Some(enrichment.result.clone());
        }
        debug!(
            subsystem = "workflow",
            component = "editor",
            degraded = enrichment.degraded,
            quota_limited = enrichment.quota_limited,
            "Draft enriched"
        );
        Ok(enrichment)
    }

    /// Write the draft.
    ///
    /// On success the session returns to `Idle` and a [`NoteEvent::Saved`] is
    /// emitted. On failure the session stays in `Editing` with every value
    /// kept.
    pub async fn save(&mut self) -> Result<SaveOutcome> {
        let draft = self.editing_draft()?.clone();
        let request = draft.request();
        request.validate()?;

        let result = {
            let _busy = BusyGuard::enter(&mut self.state, EditorState::Saving);
            persist_note(&self.repo, draft.target, request).await
        };

        let persisted = result?;
        let outcome = SaveOutcome {
            note_id: persisted.note.id,
            created: matches!(draft.target, SaveTarget::Create),
            metadata_dropped: persisted.metadata_dropped,
        };

        self.draft = None;
        self.state = EditorState::Idle;
        self.events.emit(NoteEvent::Saved {
            note_id: outcome.note_id,
            created: outcome.created,
            metadata_dropped: outcome.metadata_dropped,
        });
        info!(
            subsystem = "workflow",
            component = "editor",
            note_id = %outcome.note_id,
            created = outcome.created,
            metadata_dropped = outcome.metadata_dropped,
            "Editor session saved"
        );
        Ok(outcome)
    }

    /// Discard the draft and return to `Idle`.
    pub fn cancel(&mut self) {
        self.draft = None;
        self.state = EditorState::Idle;
    }

    fn ensure_not_busy(&self) -> Result<()> {
        match self.state {
            EditorState::Enriching | EditorState::Saving => Err(Error::Validation(
                "An enrichment or save is already in progress".to_string(),
            )),
            EditorState::Idle | EditorState::Editing => Ok(()),
        }
    }

    fn editing_draft(&mut self) -> Result<&mut Draft> {
        self.ensure_not_busy()?;
        match (self.state, self.draft.as_mut()) {
            (EditorState::Editing, Some(draft)) => Ok(draft),
            _ => Err(Error::Validation("No note is being edited".to_string())),
        }
    }
}
