//! Note and enrichment data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{Error, Result};

/// A persisted note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Note {
    /// Store-assigned identifier.
    pub id: Uuid,
    pub title: String,
    /// Markdown body.
    pub content: String,
    /// Store-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
    /// AI summary, absent until enrichment succeeded and was saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// AI tags, absent until enrichment succeeded and was saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Note {
    /// The enrichment attached to this note, if any.
    pub fn enrichment(&self) -> Option<EnrichmentResult> {
        if self.summary.is_none() && self.tags.is_none() {
            return None;
        }
        Some(EnrichmentResult {
            summary: self.summary.clone().unwrap_or_default(),
            tags: self.tags.clone().unwrap_or_default(),
        })
    }
}

/// Write payload for inserting or updating a note.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct SaveNoteRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl SaveNoteRequest {
    /// Build a payload without enrichment fields.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            summary: None,
            tags: None,
        }
    }

    /// Attach an enrichment result.
    pub fn with_enrichment(mut self, enrichment: EnrichmentResult) -> Self {
        self.summary = Some(enrichment.summary);
        self.tags = Some(enrichment.tags);
        self
    }

    /// Whether the write touches the `summary`/`tags` columns.
    pub fn has_enrichment(&self) -> bool {
        self.summary.is_some() || self.tags.is_some()
    }

    /// The same write with the enrichment columns dropped.
    pub fn without_enrichment(&self) -> Self {
        Self {
            title: self.title.clone(),
            content: self.content.clone(),
            summary: None,
            tags: None,
        }
    }

    /// Reject writes with an empty (or whitespace-only) title or content.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation("Title is required".to_string()));
        }
        if self.content.trim().is_empty() {
            return Err(Error::Validation("Content is required".to_string()));
        }
        Ok(())
    }
}

/// Summary and tags generated for a note's content.
///
/// The prompt asks for a summary of at most ~50 characters and 3-5 tags;
/// neither limit is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct EnrichmentResult {
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Outcome of one enrichment call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrichment {
    pub result: EnrichmentResult,
    /// Candidate model that produced the response.
    pub model: Option<String>,
    /// The response was not valid JSON and was truncated into a summary.
    pub degraded: bool,
    /// At least one candidate failed with a quota/rate-limit signal.
    pub quota_limited: bool,
}

/// Where an editor session writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTarget {
    /// Insert a new note.
    Create,
    /// Update the note with this id.
    Update(Uuid),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(summary: Option<&str>, tags: Option<Vec<&str>>) -> Note {
        Note {
            id: Uuid::nil(),
            title: "t".into(),
            content: "c".into(),
            created_at: Utc::now(),
            summary: summary.map(String::from),
            tags: tags.map(|t| t.into_iter().map(String::from).collect()),
        }
    }

    #[test]
    fn test_validate_rejects_empty_title() {
        let req = SaveNoteRequest::new("", "valid text");
        assert!(matches!(req.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_whitespace_content() {
        let req = SaveNoteRequest::new("Title", " \n\t ");
        assert!(matches!(req.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_validate_accepts_padded_values() {
        assert!(SaveNoteRequest::new("  Title ", "  body  ").validate().is_ok());
    }

    #[test]
    fn test_without_enrichment_drops_both_fields() {
        let req = SaveNoteRequest::new("T", "C").with_enrichment(EnrichmentResult {
            summary: "s".into(),
            tags: vec!["a".into()],
        });
        assert!(req.has_enrichment());

        let plain = req.without_enrichment();
        assert!(!plain.has_enrichment());
        assert_eq!(plain.title, "T");
        assert_eq!(plain.content, "C");
    }

    #[test]
    fn test_note_enrichment_absent() {
        assert_eq!(note(None, None).enrichment(), None);
    }

    #[test]
    fn test_note_enrichment_partial() {
        let e = note(Some("sum"), None).enrichment().unwrap();
        assert_eq!(e.summary, "sum");
        assert!(e.tags.is_empty());
    }

    #[test]
    fn test_note_serialization_skips_missing_enrichment() {
        let json = serde_json::to_value(note(None, None)).unwrap();
        assert!(json.get("summary").is_none());
        assert!(json.get("tags").is_none());
    }

    #[test]
    fn test_enrichment_result_tags_default() {
        let parsed: EnrichmentResult = serde_json::from_str(r#"{"summary":"x"}"#).unwrap();
        assert_eq!(parsed.summary, "x");
        assert!(parsed.tags.is_empty());
    }
}
