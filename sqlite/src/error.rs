//! Error types for session operations.
//!
//! Each session operation maps its driver failure onto its own variant so
//! callers can tell which step of the run went wrong.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The database file could not be opened, or is not a database.
    #[error("failed to connect to database '{}': {source}", .path.display())]
    ConnectionError {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Creating the table failed (e.g. read-only storage).
    #[error("failed to ensure table '{table}': {source}")]
    SchemaError {
        table: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// The insert statement could not be prepared or a row failed for a
    /// reason other than a constraint violation.
    #[error("failed to insert records: {0}")]
    InsertError(#[source] rusqlite::Error),

    /// The select could not run, typically because the table is missing.
    #[error("failed to fetch records: {0}")]
    QueryError(#[source] rusqlite::Error),

    /// Any other SQLite failure (status checks, closing).
    #[error("database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),
}

/// Convenience alias for results with [`SessionError`].
pub type Result<T> = std::result::Result<T, SessionError>;
