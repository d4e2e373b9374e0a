//! Enrichment prompt.

/// Build the instruction prompt for `content`.
///
/// The model is asked for a short summary and a handful of tags as a bare
/// JSON object. Output that ignores the format is handled by
/// [`crate::normalize`].
pub fn enrichment_prompt(content: &str) -> String {
    format!(
        r#"You are a professional note-taking assistant. For the note below, write a short summary (no more than 50 characters) and 3-5 relevant tags.
Reply with JSON only. Do not add Markdown formatting or any other text.

Example structure:
{{
  "summary": "A short summary...",
  "tags": ["tag1", "tag2"]
}}

Note content:
{content}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_content_verbatim() {
        let content = "# Groceries\n- milk {2}\n- eggs";
        let prompt = enrichment_prompt(content);
        assert!(prompt.contains(content));
        assert!(prompt.contains("\"summary\""));
        assert!(prompt.contains("\"tags\""));
        assert!(prompt.ends_with("- eggs\n"));
    }
}
