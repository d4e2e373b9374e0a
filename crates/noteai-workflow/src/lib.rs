//! # noteai-workflow
//!
//! Session logic for NoteAI, independent of any UI or transport.
//!
//! - [`NoteEditor`]: create/edit a note, optionally enrich it, save it
//! - [`NoteList`]: the newest-first note list, with local deletes and
//!   event-driven refresh
//! - [`persist_note`]: the validated write with the enrichment-column
//!   fallback, shared with the HTTP layer

pub mod editor;
pub mod note_list;
pub mod save;

pub use editor::{Draft, EditorState, NoteEditor, SaveOutcome};
pub use note_list::NoteList;
pub use save::{persist_note, Persisted};
