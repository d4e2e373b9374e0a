//! # noteai-inference
//!
//! Generative-AI enrichment for NoteAI.
//!
//! This crate provides:
//! - A Gemini REST backend implementing [`GenerationProvider`]
//! - The enrichment prompt and response normalization
//! - [`EnrichmentClient`], which walks an ordered list of candidate models
//!   and implements [`Enricher`]
//!
//! # Feature Flags
//!
//! - `mock`: export [`mock::ScriptedProvider`] for tests in dependent crates
//!
//! # Example
//!
//! ```rust,no_run
//! use noteai_inference::{EnrichmentClient, EnrichmentConfig};
//! use noteai_core::Enricher;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = EnrichmentClient::gemini(&EnrichmentConfig::from_env()).unwrap();
//!     let enrichment = client.enrich("Buy milk and eggs tomorrow").await.unwrap();
//!     println!("{} {:?}", enrichment.result.summary, enrichment.result.tags);
//! }
//! ```

pub mod config;
pub mod enrichment;
pub mod gemini;
pub mod normalize;
pub mod prompt;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use noteai_core::*;

pub use config::EnrichmentConfig;
pub use enrichment::{AttemptOutcome, EnrichmentClient};
pub use gemini::{GeminiBackend, ModelInfo};
pub use normalize::{degraded_result, parse_enrichment, strip_code_fences};
pub use prompt::enrichment_prompt;
