//! Google Gemini REST backend.
//!
//! Talks to the `generativelanguage` API directly over reqwest:
//!
//! - `POST {base}/models/{model}:generateContent` for generation
//! - `GET {base}/models` for model discovery
//!
//! # Example
//!
//! ```rust,no_run
//! use noteai_inference::{EnrichmentConfig, GeminiBackend};
//! use noteai_core::GenerationProvider;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = EnrichmentConfig::from_env();
//!     let backend = GeminiBackend::new(&config).unwrap();
//!     let text = backend.generate("gemini-2.0-flash", "Say hi").await.unwrap();
//!     println!("{}", text);
//! }
//! ```

mod backend;
pub mod types;

pub use backend::GeminiBackend;
pub use types::ModelInfo;
