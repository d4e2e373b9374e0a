//! # noteai-db
//!
//! Note storage for NoteAI.
//!
//! [`PgNoteRepository`] writes to PostgreSQL and reports a missing
//! `summary`/`tags` column as [`Error::SchemaMismatch`] (see
//! [`classify_write_error`]), leaving the retry to the caller.
//! [`MemoryNoteRepository`] keeps notes in process for local runs and tests.
//!
//! ```rust,ignore
//! let db = noteai_db::Database::connect("postgres://localhost/noteai").await?;
//! let note = db.notes.insert(SaveNoteRequest::new("Hello", "world")).await?;
//! ```

pub mod memory;
pub mod notes;
pub mod pool;
pub mod schema;

pub use noteai_core::*;

pub use memory::MemoryNoteRepository;
pub use notes::PgNoteRepository;
pub use pool::{create_pool, log_pool_metrics, redact_url, PoolConfig};
pub use schema::{classify_write_error, is_missing_column_code};

/// Pool plus the repositories built on it.
#[derive(Clone)]
pub struct Database {
    pub pool: sqlx::Pool<sqlx::Postgres>,
    pub notes: PgNoteRepository,
}

impl Database {
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            notes: PgNoteRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_config(url, PoolConfig::default()).await
    }

    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Apply `migrations/` in order, skipping those already recorded.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}
