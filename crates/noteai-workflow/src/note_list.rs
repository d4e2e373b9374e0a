//! Note list session.
//!
//! Holds the notes currently shown, newest first. Deletes update the local
//! copy without a refetch; saves announced on the [`EventBus`] trigger a full
//! refetch.

use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, warn};
use uuid::Uuid;

use noteai_core::{EventBus, Note, NoteEvent, NoteRepository, Result};

pub struct NoteList<R> {
    repo: R,
    notes: Vec<Note>,
}

impl<R: NoteRepository> NoteList<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            notes: Vec::new(),
        }
    }

    /// Subscribe to note events for [`NoteList::drain_events`].
    pub fn watch(bus: &EventBus) -> broadcast::Receiver<NoteEvent> {
        bus.subscribe()
    }

    /// Notes as of the last fetch, newest first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Load every note. On failure the current list is kept.
    pub async fn fetch(&mut self) -> Result<&[Note]> {
        self.notes = self.repo.list().await?;
        debug!(
            subsystem = "workflow",
            component = "note_list",
            result_count = self.notes.len(),
            "Note list fetched"
        );
        Ok(&self.notes)
    }

    /// Delete one note and drop it from the local list. On failure the list
    /// is unchanged.
    pub async fn delete(&mut self, id: Uuid) -> Result<()> {
        self.repo.delete(id).await?;
        self.notes.retain(|n| n.id != id);
        Ok(())
    }

    /// React to one event. Returns true when the list was refetched.
    pub async fn handle_event(&mut self, event: &NoteEvent) -> Result<bool> {
        match event {
            NoteEvent::Saved { .. } => {
                self.fetch().await?;
                Ok(true)
            }
            NoteEvent::Deleted { note_id } => {
                self.notes.retain(|n| n.id != *note_id);
                Ok(false)
            }
        }
    }

    /// Apply every pending event without waiting. Refetches at most once.
    /// Returns the number of events consumed.
    pub async fn drain_events(&mut self, rx: &mut broadcast::Receiver<NoteEvent>) -> Result<usize> {
        let mut consumed = 0;
        let mut refetch = false;
        loop {
            match rx.try_recv() {
                Ok(NoteEvent::Saved { .. }) => {
                    consumed += 1;
                    refetch = true;
                }
                Ok(event) => {
                    consumed += 1;
                    self.handle_event(&event).await?;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(
                        subsystem = "workflow",
                        component = "note_list",
                        skipped,
                        "Note events lagged, refetching"
                    );
                    refetch = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        if refetch {
            self.fetch().await?;
        }
        Ok(consumed)
    }
}
