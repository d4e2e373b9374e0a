//! Note repository implementation.

use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, QueryBuilder, Row};
use tracing::{debug, info};
use uuid::Uuid;

use noteai_core::{Error, Note, NoteRepository, Result, SaveNoteRequest};

use crate::schema::classify_write_error;

/// PostgreSQL implementation of NoteRepository.
///
/// Reads tolerate a table without the `summary`/`tags` columns; writes that
/// include them against such a table fail with [`Error::SchemaMismatch`].
#[derive(Clone)]
pub struct PgNoteRepository {
    pool: Pool<Postgres>,
}

impl PgNoteRepository {
    /// Create a new PgNoteRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Map a row to a Note. Enrichment columns may be absent from the table.
fn map_row_to_note(row: &PgRow) -> Result<Note> {
    let id: Uuid = row.try_get("id")?;
    let title: String = row.try_get("title")?;
    let content: String = row.try_get("content")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    let summary: Option<String> = row.try_get("summary").ok().flatten();
    let tags: Option<Vec<String>> = row.try_get("tags").ok().flatten();

    Ok(Note {
        id,
        title,
        content,
        created_at,
        summary,
        tags,
    })
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn insert(&self, req: SaveNoteRequest) -> Result<Note> {
        let start = Instant::now();
        let with_enrichment = req.has_enrichment();

        let mut qb: QueryBuilder<Postgres> = if with_enrichment {
            QueryBuilder::new("INSERT INTO notes (title, content, summary, tags) VALUES (")
        } else {
            QueryBuilder::new("INSERT INTO notes (title, content) VALUES (")
        };
        {
            let mut values = qb.separated(", ");
            values.push_bind(&req.title);
            values.push_bind(&req.content);
            if with_enrichment {
                values.push_bind(&req.summary);
                values.push_bind(&req.tags);
            }
        }
        qb.push(") RETURNING *");

        let row = qb
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(classify_write_error)?;
        let note = map_row_to_note(&row)?;

        info!(
            subsystem = "db",
            component = "notes",
            op = "insert",
            note_id = %note.id,
            with_enrichment,
            duration_ms = start.elapsed().as_millis() as u64,
            "Note inserted"
        );
        Ok(note)
    }

    async fn update(&self, id: Uuid, req: SaveNoteRequest) -> Result<Note> {
        let start = Instant::now();
        let with_enrichment = req.has_enrichment();

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE notes SET title = ");
        qb.push_bind(&req.title);
        qb.push(", content = ");
        qb.push_bind(&req.content);
        if with_enrichment {
            qb.push(", summary = ");
            qb.push_bind(&req.summary);
            qb.push(", tags = ");
            qb.push_bind(&req.tags);
        }
        qb.push(" WHERE id = ");
        qb.push_bind(id);
        qb.push(" RETURNING *");

        let row = qb
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(classify_write_error)?
            .ok_or_else(|| Error::NotFound(format!("note {}", id)))?;
        let note = map_row_to_note(&row)?;

        info!(
            subsystem = "db",
            component = "notes",
            op = "update",
            note_id = %id,
            with_enrichment,
            duration_ms = start.elapsed().as_millis() as u64,
            "Note updated"
        );
        Ok(note)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(
            subsystem = "db",
            component = "notes",
            op = "delete",
            note_id = %id,
            rows = result.rows_affected(),
            "Note delete executed"
        );
        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> Result<Note> {
        let row = sqlx::query("SELECT * FROM notes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound(format!("note {}", id)))?;
        map_row_to_note(&row)
    }

    async fn list(&self) -> Result<Vec<Note>> {
        let start = Instant::now();
        let rows = sqlx::query("SELECT * FROM notes ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await?;
        let notes = rows.iter().map(map_row_to_note).collect::<Result<Vec<_>>>()?;

        debug!(
            subsystem = "db",
            component = "notes",
            op = "list",
            result_count = notes.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Notes listed"
        );
        Ok(notes)
    }
}
