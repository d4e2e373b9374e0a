//! Scripted generation provider for deterministic testing.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use noteai_inference::mock::ScriptedProvider;
//! use noteai_inference::EnrichmentClient;
//!
//! let provider = ScriptedProvider::new()
//!     .with_error("gemini-flash-latest", 429, "Resource has been exhausted")
//!     .with_response("gemini-2.5-flash", r#"{"summary":"x","tags":["a"]}"#);
//! let client = EnrichmentClient::new(provider.clone(), provider.models());
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use noteai_core::{GenerationProvider, ProviderError};

type Scripted = std::result::Result<String, ProviderError>;

/// Provider that answers from a per-model script.
///
/// Models without a script answer with the default, which is a 404 unless
/// overridden.
#[derive(Clone)]
pub struct ScriptedProvider {
    script: Arc<Mutex<Vec<(String, Scripted)>>>,
    fallback: Arc<Mutex<Scripted>>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

#[derive(Debug, Clone)]
pub struct MockCall {
    pub model: String,
    pub prompt: String,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(Vec::new())),
            fallback: Arc::new(Mutex::new(Err(ProviderError::http(
                404,
                "models/unknown is not found for API version v1beta",
            )))),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer `model` with `text`.
    pub fn with_response(self, model: impl Into<String>, text: impl Into<String>) -> Self {
        self.push(model.into(), Ok(text.into()));
        self
    }

    /// Fail `model` with an HTTP status.
    pub fn with_error(self, model: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        self.push(model.into(), Err(ProviderError::http(status, message)));
        self
    }

    /// Fail `model` with an arbitrary provider error.
    pub fn with_provider_error(self, model: impl Into<String>, error: ProviderError) -> Self {
        self.push(model.into(), Err(error));
        self
    }

    /// Answer unscripted models with `text`.
    pub fn with_default_response(self, text: impl Into<String>) -> Self {
        *self.fallback.lock().unwrap() = Ok(text.into());
        self
    }

    /// Fail unscripted models with an HTTP status.
    pub fn with_default_error(self, status: u16, message: impl Into<String>) -> Self {
        *self.fallback.lock().unwrap() = Err(ProviderError::http(status, message));
        self
    }

    fn push(&self, model: String, answer: Scripted) {
        let mut script = self.script.lock().unwrap();
        script.retain(|(m, _)| *m != model);
        script.push((model, answer));
    }

    /// Scripted models in the order they were added.
    pub fn models(&self) -> Vec<String> {
        self.script
            .lock()
            .unwrap()
            .iter()
            .map(|(m, _)| m.clone())
            .collect()
    }

    /// Get all logged calls for assertion.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Models called, in call order.
    pub fn called_models(&self) -> Vec<String> {
        self.get_calls().into_iter().map(|c| c.model).collect()
    }

    pub fn call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }
}

impl Default for ScriptedProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationProvider for ScriptedProvider {
    async fn generate(&self, model: &str, prompt: &str) -> Scripted {
        self.call_log.lock().unwrap().push(MockCall {
            model: model.to_string(),
            prompt: prompt.to_string(),
        });

        let scripted = self
            .script
            .lock()
            .unwrap()
            .iter()
            .find(|(m, _)| m == model)
            .map(|(_, answer)| answer.clone());
        scripted.unwrap_or_else(|| self.fallback.lock().unwrap().clone())
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_answers_and_logs() {
        let provider = ScriptedProvider::new()
            .with_response("a", "hello")
            .with_error("b", 429, "quota");

        assert_eq!(provider.generate("a", "p1").await.unwrap(), "hello");
        assert_eq!(provider.generate("b", "p2").await.unwrap_err().status(), Some(429));
        assert_eq!(provider.generate("c", "p3").await.unwrap_err().status(), Some(404));

        assert_eq!(provider.called_models(), vec!["a", "b", "c"]);
        assert_eq!(provider.get_calls()[1].prompt, "p2");
        assert_eq!(provider.models(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_rescripting_a_model_replaces_it() {
        let provider = ScriptedProvider::new()
            .with_response("a", "one")
            .with_response("a", "two");
        assert_eq!(provider.models(), vec!["a"]);
        assert_eq!(provider.generate("a", "p").await.unwrap(), "two");
    }
}
