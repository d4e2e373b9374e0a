//! Classification of persistence failures.
//!
//! The editor only needs to know whether a write failed because the
//! optional enrichment columns are missing. This module is the single place
//! that knows which store error codes mean that.

use noteai_core::Error;

/// PostgreSQL SQLSTATE `undefined_column`.
pub const PG_UNDEFINED_COLUMN: &str = "42703";

/// PostgREST (hosted Postgres REST gateway) "column not found in schema cache".
pub const POSTGREST_UNKNOWN_COLUMN: &str = "PGRST204";

/// Whether a store error code means "column does not exist".
pub fn is_missing_column_code(code: &str) -> bool {
    code == PG_UNDEFINED_COLUMN || code == POSTGREST_UNKNOWN_COLUMN
}

/// Map a failed write to the core error taxonomy.
///
/// Missing-column failures become [`Error::SchemaMismatch`]; everything else
/// stays a [`Error::Database`].
pub fn classify_write_error(err: sqlx::Error) -> Error {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err
            .code()
            .map(|code| is_missing_column_code(&code))
            .unwrap_or(false)
        {
            return Error::SchemaMismatch(db_err.message().to_string());
        }
    }
    Error::Database(err)
}
