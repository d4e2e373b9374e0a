//! Turning raw model text into an [`EnrichmentResult`].

use serde_json::Value;

use noteai_core::defaults::{DEGRADED_SUMMARY_CHARS, DEGRADED_SUMMARY_SUFFIX};
use noteai_core::EnrichmentResult;

/// Remove every "```json" and "```" marker, then trim.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse cleaned model text.
///
/// Accepts a JSON object with a string `summary`. `tags` keeps only string
/// elements and defaults to empty. Returns `None` for anything else.
pub fn parse_enrichment(text: &str) -> Option<EnrichmentResult> {
    let value: Value = serde_json::from_str(&strip_code_fences(text)).ok()?;
    let object = value.as_object()?;
    let summary = object.get("summary")?.as_str()?.to_string();
    let tags = object
        .get("tags")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();
    Some(EnrichmentResult { summary, tags })
}

/// Fallback for text that is not the expected JSON: the first characters of
/// the raw response plus an ellipsis, and no tags.
pub fn degraded_result(raw: &str) -> EnrichmentResult {
    let mut summary: String = raw.chars().take(DEGRADED_SUMMARY_CHARS).collect();
    summary.push_str(DEGRADED_SUMMARY_SUFFIX);
    EnrichmentResult {
        summary,
        tags: Vec::new(),
    }
}
