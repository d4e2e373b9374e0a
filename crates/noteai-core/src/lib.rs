//! # noteai-core
//!
//! Core types, traits, and abstractions for NoteAI.
//!
//! This crate provides the note and enrichment data structures, the error
//! taxonomy, and the repository/provider traits that the persistence,
//! inference, workflow, and API crates are written against.
//!
//! ## Logging
//!
//! Every crate logs through `tracing` with the structured fields
//! `subsystem` ("api", "db", "inference", "workflow"), `component`, `op`,
//! plus `note_id`, `model`, `attempt`, `duration_ms` where they apply.
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Every candidate model failed, server-side handler failure |
//! | WARN  | Automatic fallback applied (next model, degraded text, write without summary/tags) |
//! | INFO  | Startup, completed writes and enrichments |
//! | DEBUG | Per-attempt decisions, query timings, emitted events |

pub mod defaults;
pub mod error;
pub mod events;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, ProviderError, ProviderErrorKind, Result};
pub use events::{EventBus, NoteEvent};
pub use models::*;
pub use traits::*;
