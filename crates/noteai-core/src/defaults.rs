//! Centralized default constants for NoteAI.
//!
//! Crates reference these constants instead of defining their own magic
//! numbers. Organized by domain area.

// =============================================================================
// ENRICHMENT
// =============================================================================

/// Gemini REST endpoint (v1beta carries the `-latest` aliases).
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Candidate models, tried in order until one answers.
///
/// Availability and free-tier quota differ per model and per key, so the
/// chain starts with the cheapest aliases and ends with pinned versions.
pub const CANDIDATE_MODELS: &[&str] = &[
    "gemini-flash-latest",
    "gemini-2.5-flash",
    "gemini-2.0-flash",
    "gemini-1.5-flash",
    "gemini-pro-latest",
    "gemini-pro",
    "gemini-2.0-flash-lite",
    "gemini-1.5-flash-001",
];

/// Transport timeout for a single provider call, in seconds.
pub const PROVIDER_TIMEOUT_SECS: u64 = 60;

/// Characters of raw model text kept when the response is not valid JSON.
pub const DEGRADED_SUMMARY_CHARS: usize = 100;

/// Suffix appended to a truncated degraded summary.
pub const DEGRADED_SUMMARY_SUFFIX: &str = "...";

// =============================================================================
// SERVER
// =============================================================================

/// Default bind host.
pub const HOST: &str = "0.0.0.0";

/// Default bind port.
pub const PORT: u16 = 3000;

/// Maximum accepted request body, in bytes.
pub const REQUEST_BODY_LIMIT: usize = 1024 * 1024;

/// Event bus capacity for a server or editor session.
pub const EVENT_BUS_CAPACITY: usize = 64;
