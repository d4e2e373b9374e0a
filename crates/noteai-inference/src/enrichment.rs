//! Candidate-chain enrichment client.
//!
//! Models are tried in order. The first response ends the call: valid JSON is
//! returned as parsed, anything else becomes a degraded result. Provider
//! failures move on to the next candidate. When every candidate fails the
//! call reports a quota error if any attempt was rate limited, otherwise the
//! provider is unavailable.

use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use noteai_core::{
    Enricher, Enrichment, EnrichmentResult, Error, GenerationProvider, ProviderError,
    ProviderErrorKind, Result,
};

use crate::config::EnrichmentConfig;
use crate::gemini::GeminiBackend;
use crate::normalize::{degraded_result, parse_enrichment};
use crate::prompt::enrichment_prompt;

/// Detail reported when no candidate produced an error message.
const NO_ATTEMPT_DETAILS: &str = "Unable to reach the AI service";

/// Result of a single candidate attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The response parsed as the expected JSON. Stop.
    Parsed(EnrichmentResult),
    /// The response was text but not the expected JSON. Stop with a
    /// truncated summary.
    Degraded(EnrichmentResult),
    /// The invocation failed. Try the next candidate.
    Retryable(ProviderError),
    /// The invocation cannot succeed for any candidate. Stop with an error.
    Fatal(ProviderError),
}

impl AttemptOutcome {
    /// Classify one provider result.
    pub fn from_response(response: std::result::Result<String, ProviderError>) -> Self {
        match response {
            Ok(text) => match parse_enrichment(&text) {
                Some(parsed) => Self::Parsed(parsed),
                None => Self::Degraded(degraded_result(&text)),
            },
            Err(e @ ProviderError::Misconfigured(_)) => Self::Fatal(e),
            Err(e) => Self::Retryable(e),
        }
    }
}

/// Enrichment client over any [`GenerationProvider`].
pub struct EnrichmentClient<P> {
    provider: P,
    candidate_models: Vec<String>,
}

impl EnrichmentClient<GeminiBackend> {
    /// Gemini-backed client. Fails with [`Error::Config`] when no API key is
    /// configured.
    pub fn gemini(config: &EnrichmentConfig) -> Result<Self> {
        if !config.is_configured() {
            return Err(Error::Config("API key not configured".to_string()));
        }
        let backend = GeminiBackend::new(config)?;
        Ok(Self::new(backend, config.candidate_models.clone()))
    }
}

impl<P: GenerationProvider> EnrichmentClient<P> {
    pub fn new(provider: P, candidate_models: Vec<String>) -> Self {
        Self {
            provider,
            candidate_models,
        }
    }

    /// Models tried, in order.
    pub fn candidate_models(&self) -> &[String] {
        &self.candidate_models
    }

    /// Run the candidate chain for `content`.
    pub async fn run(&self, content: &str) -> Result<Enrichment> {
        if content.trim().is_empty() {
            return Err(Error::Validation("Content is required".to_string()));
        }

        let start = Instant::now();
        let prompt = enrichment_prompt(content);
        let mut last_error: Option<ProviderError> = None;
        let mut quota_limited = false;

        for (attempt, model) in self.candidate_models.iter().enumerate() {
            debug!(
                subsystem = "inference",
                component = "enrichment",
                provider = self.provider.provider_name(),
                model = %model,
                attempt = attempt + 1,
                "Trying candidate model"
            );

            let outcome = AttemptOutcome::from_response(self.provider.generate(model, &prompt).await);
            let (result, degraded) = match outcome {
                AttemptOutcome::Parsed(result) => (result, false),
                AttemptOutcome::Degraded(result) => {
                    warn!(
                        subsystem = "inference",
                        component = "enrichment",
                        model = %model,
                        "Response was not valid JSON, using truncated text"
                    );
                    (result, true)
                }
                AttemptOutcome::Retryable(e) => {
                    let kind = e.kind();
                    if kind == ProviderErrorKind::RateLimited {
                        quota_limited = true;
                    }
                    warn!(
                        subsystem = "inference",
                        component = "enrichment",
                        model = %model,
                        attempt = attempt + 1,
                        kind = ?kind,
                        error = %e,
                        "Candidate model failed"
                    );
                    last_error = Some(e);
                    continue;
                }
                AttemptOutcome::Fatal(e) => {
                    warn!(
                        subsystem = "inference",
                        component = "enrichment",
                        model = %model,
                        error = %e,
                        "Provider cannot be called"
                    );
                    return Err(Error::Config(e.to_string()));
                }
            };

            info!(
                subsystem = "inference",
                component = "enrichment",
                model = %model,
                attempt = attempt + 1,
                degraded,
                quota_limited,
                tag_count = result.tags.len(),
                duration_ms = start.elapsed().as_millis() as u64,
                "Enrichment complete"
            );
            return Ok(Enrichment {
                result,
                model: Some(model.clone()),
                degraded,
                quota_limited,
            });
        }

        let details = last_error
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| NO_ATTEMPT_DETAILS.to_string());
        let quota = quota_limited
            || last_error
                .as_ref()
                .is_some_and(|e| e.kind() == ProviderErrorKind::RateLimited);

        error!(
            subsystem = "inference",
            component = "enrichment",
            candidates = self.candidate_models.len(),
            quota,
            duration_ms = start.elapsed().as_millis() as u64,
            details = %details,
            "All candidate models failed"
        );

        if quota {
            Err(Error::QuotaExceeded { details })
        } else {
            Err(Error::ProviderUnavailable { details })
        }
    }
}

#[async_trait]
impl<P: GenerationProvider> Enricher for EnrichmentClient<P> {
    async fn enrich(&self, content: &str) -> Result<Enrichment> {
        self.run(content).await
    }
}
