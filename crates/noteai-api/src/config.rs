//! Server configuration.

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use noteai_core::defaults;

/// Process-level settings read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// PostgreSQL URL. `None` runs on the in-memory store.
    pub database_url: Option<String>,
    /// Apply `migrations/` before serving.
    pub run_migrations: bool,
    /// Allowed CORS origins. `None` allows any origin.
    pub cors_origins: Option<Vec<HeaderValue>>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::HOST.to_string(),
            port: defaults::PORT,
            database_url: None,
            run_migrations: false,
            cors_origins: None,
        }
    }
}

impl ServerConfig {
    /// Load from environment variables.
    ///
    /// - `HOST`, `PORT`
    /// - `DATABASE_URL`
    /// - `RUN_MIGRATIONS` ("true"/"1")
    /// - `CORS_ALLOWED_ORIGINS` (comma-separated)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            run_migrations: std::env::var("RUN_MIGRATIONS")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            cors_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| parse_allowed_origins(&s))
                .filter(|origins| !origins.is_empty()),
        }
    }

    /// `host:port` to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// CORS layer for the configured origins.
    pub fn cors_layer(&self) -> CorsLayer {
        let layer = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .max_age(std::time::Duration::from_secs(3600));

        match &self.cors_origins {
            Some(origins) => layer
                .allow_origin(AllowOrigin::list(origins.clone()))
                .allow_credentials(true),
            None => layer.allow_origin(AllowOrigin::any()),
        }
    }
}

/// Parse a comma-separated origin list, skipping blanks and invalid values.
pub fn parse_allowed_origins(raw: &str) -> Vec<HeaderValue> {
    raw.split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}
