//! Gemini backend implementation.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, info, warn};

use noteai_core::{Error, GenerationProvider, ProviderError, Result};

use super::types::*;
use crate::config::EnrichmentConfig;

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini generation backend.
#[derive(Clone)]
pub struct GeminiBackend {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl GeminiBackend {
    /// Create a backend from enrichment configuration.
    ///
    /// A missing API key is not an error here; every call will fail with
    /// [`ProviderError::Misconfigured`] instead.
    pub fn new(config: &EnrichmentConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            subsystem = "inference",
            component = "gemini",
            base_url = %config.base_url,
            timeout_secs = config.timeout.as_secs(),
            key_configured = config.api_key.is_some(),
            "Initializing Gemini backend"
        );

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_key(&self) -> std::result::Result<&str, ProviderError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| ProviderError::Misconfigured("API key not configured".to_string()))
    }

    /// List every model visible to the API key, following pagination.
    pub async fn list_models(&self) -> std::result::Result<Vec<ModelInfo>, ProviderError> {
        let api_key = self.api_key()?;
        let url = format!("{}/models", self.base_url);
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut req = self.client.get(&url).header(API_KEY_HEADER, api_key);
            if let Some(ref token) = page_token {
                req = req.query(&[("pageToken", token.as_str())]);
            }
            let response = req
                .send()
                .await
                .map_err(|e| ProviderError::Transport(format!("Request failed: {}", e)))?;
            let page: ListModelsResponse = read_json(response).await?;

            models.extend(page.models);
            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!(
            subsystem = "inference",
            component = "gemini",
            op = "list_models",
            result_count = models.len(),
            "Models listed"
        );
        Ok(models)
    }
}

/// Decode a success body, or turn an error status into [`ProviderError::Http`].
async fn read_json<T: serde::de::DeserializeOwned>(
    response: Response,
) -> std::result::Result<T, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<GeminiErrorResponse>(&body) {
            Ok(parsed) if !parsed.error.message.is_empty() => parsed.error.message,
            _ if !body.trim().is_empty() => body.trim().to_string(),
            _ => status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        };
        return Err(ProviderError::http(status.as_u16(), message));
    }

    response
        .json()
        .await
        .map_err(|e| ProviderError::Transport(format!("Failed to parse response: {}", e)))
}

#[async_trait]
impl GenerationProvider for GeminiBackend {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
    ) -> std::result::Result<String, ProviderError> {
        let api_key = self.api_key()?;
        let start = Instant::now();
        debug!(
            subsystem = "inference",
            component = "gemini",
            op = "generate",
            model,
            prompt_len = prompt.len(),
            "Generating"
        );

        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(&GenerateContentRequest::user_prompt(prompt))
            .send()
            .await
            .map_err(|e| ProviderError::Transport(format!("Request failed: {}", e)))?;

        let result: GenerateContentResponse = read_json(response).await.inspect_err(|e| {
            warn!(
                subsystem = "inference",
                component = "gemini",
                op = "generate",
                model,
                status = e.status(),
                duration_ms = start.elapsed().as_millis() as u64,
                error = %e,
                "Generation request failed"
            );
        })?;

        // A success without text counts as an empty answer, which the
        // enrichment chain turns into a degraded result.
        let text = result.text().unwrap_or_else(|| {
            warn!(
                subsystem = "inference",
                component = "gemini",
                op = "generate",
                model,
                reason = %result.empty_reason(),
                "Response carried no text"
            );
            String::new()
        });

        debug!(
            subsystem = "inference",
            component = "gemini",
            op = "generate",
            model,
            response_len = text.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Generation complete"
        );
        Ok(text)
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }
}
