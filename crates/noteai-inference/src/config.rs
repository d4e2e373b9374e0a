//! Enrichment configuration.
//!
//! Values are read from the environment once, at process start, and passed
//! down explicitly. Nothing below the binaries looks at the environment.

use std::time::Duration;

use noteai_core::defaults;

/// Primary API key variable.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Accepted alias for [`API_KEY_VAR`].
pub const API_KEY_ALIAS_VAR: &str = "GOOGLE_GEMINI_API_KEY";

/// Provider and candidate-chain settings.
#[derive(Debug, Clone)]
pub struct EnrichmentConfig {
    /// Provider API key. `None` when unset or blank.
    pub api_key: Option<String>,
    /// Provider REST base URL.
    pub base_url: String,
    /// Models tried in order.
    pub candidate_models: Vec<String>,
    /// Transport timeout for one provider call.
    pub timeout: Duration,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: defaults::GEMINI_BASE_URL.to_string(),
            candidate_models: defaults::CANDIDATE_MODELS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            timeout: Duration::from_secs(defaults::PROVIDER_TIMEOUT_SECS),
        }
    }
}

impl EnrichmentConfig {
    /// Load from environment variables.
    ///
    /// - `GEMINI_API_KEY` (or `GOOGLE_GEMINI_API_KEY`)
    /// - `GEMINI_BASE_URL`
    /// - `NOTEAI_CANDIDATE_MODELS` (comma-separated)
    /// - `GEMINI_TIMEOUT` (seconds)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .and_then(|k| normalize_api_key(&k))
            .or_else(|| {
                std::env::var(API_KEY_ALIAS_VAR)
                    .ok()
                    .and_then(|k| normalize_api_key(&k))
            });

        Self {
            api_key,
            base_url: std::env::var("GEMINI_BASE_URL").unwrap_or(defaults.base_url),
            candidate_models: std::env::var("NOTEAI_CANDIDATE_MODELS")
                .ok()
                .map(|s| parse_model_list(&s))
                .filter(|models| !models.is_empty())
                .unwrap_or(defaults.candidate_models),
            timeout: std::env::var("GEMINI_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = normalize_api_key(&api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_candidate_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.candidate_models = models.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether a provider key is present.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Trim a key; blank counts as missing.
pub fn normalize_api_key(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Split a comma-separated model list, dropping blanks.
pub fn parse_model_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from)
        .collect()
}
