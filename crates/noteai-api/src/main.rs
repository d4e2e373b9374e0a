//! noteai-api - HTTP server for the NoteAI note service.
//!
//! Environment:
//!   LOG_FORMAT  - "json" or "text" (default "text")
//!   LOG_FILE    - write logs to a daily-rotated file instead of stdout
//!   LOG_ANSI    - force ANSI colors on or off
//!   RUST_LOG    - filter directives

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use noteai_api::{build_router, AppState, ServerConfig};
use noteai_core::{Enricher, NoteRepository};
use noteai_db::{Database, MemoryNoteRepository, PoolConfig};
use noteai_inference::{EnrichmentClient, EnrichmentConfig};

const DEFAULT_FILTER: &str =
    "noteai_api=debug,noteai_workflow=debug,noteai_inference=info,noteai_db=info,tower_http=debug";

/// Install the global subscriber. The returned guard must outlive the
/// server when logging to a file.
fn init_tracing() -> Option<WorkerGuard> {
    let json = std::env::var("LOG_FORMAT").map_or(false, |f| f.eq_ignore_ascii_case("json"));
    let ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| matches!(v.as_str(), "1" | "true"));
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    let (writer, guard) = match std::env::var("LOG_FILE").ok() {
        Some(path) => {
            let path = Path::new(&path);
            let dir = path.parent().unwrap_or(Path::new("."));
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("noteai-api.log");
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, name));
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };
    let to_file = writer.is_some();

    match (writer, json) {
        (Some(w), true) => registry.with(fmt::layer().json().with_writer(w)).init(),
        (Some(w), false) => registry
            .with(fmt::layer().with_writer(w).with_ansi(ansi.unwrap_or(false)))
            .init(),
        (None, true) => registry.with(fmt::layer().json()).init(),
        (None, false) => registry
            .with(fmt::layer().with_ansi(ansi.unwrap_or(true)))
            .init(),
    }

    info!(json, to_file, "Logging initialized");
    guard
}

async fn open_note_store(config: &ServerConfig) -> anyhow::Result<Arc<dyn NoteRepository>> {
    let Some(url) = config.database_url.as_deref() else {
        warn!("DATABASE_URL not set, notes are kept in memory and lost on exit");
        return Ok(Arc::new(MemoryNoteRepository::new()));
    };

    let db = Database::connect_with_config(url, PoolConfig::from_env()).await?;
    if config.run_migrations {
        info!("Running database migrations");
        db.migrate().await?;
    }
    noteai_db::log_pool_metrics(db.pool());
    Ok(Arc::new(db.notes))
}

fn build_enricher() -> anyhow::Result<Option<Arc<dyn Enricher>>> {
    let config = EnrichmentConfig::from_env();
    if !config.is_configured() {
        warn!("GEMINI_API_KEY not set, /api/ai will answer 500");
        return Ok(None);
    }
    let client = EnrichmentClient::gemini(&config)?;
    info!(
        candidates = client.candidate_models().len(),
        "Enrichment enabled"
    );
    Ok(Some(Arc::new(client)))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let _log_guard = init_tracing();

    let config = ServerConfig::from_env();
    let notes = open_note_store(&config).await?;
    let enricher = build_enricher()?;

    let app = build_router(AppState::new(notes, enricher), &config);

    let addr: SocketAddr = config.bind_addr().parse()?;
    info!(%addr, "NoteAI API listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
