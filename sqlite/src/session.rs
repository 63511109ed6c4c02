//! The database session: one owned connection, four operations.
//!
//! # Example
//!
//! ```
//! use userbase_core::NewUser;
//! use userbase_sqlite::Session;
//!
//! let mut session = Session::open_in_memory().unwrap();
//! session.ensure_schema().unwrap();
//!
//! let users = vec![
//!     NewUser::new("Alex", Some(28), "a@x.com"),
//!     NewUser::new("Maria", Some(34), "m@x.com"),
//! ];
//! let report = session.insert_records(&users).unwrap();
//! assert_eq!(report.inserted, 2);
//!
//! let table = session.fetch_all().unwrap();
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.rows()[0].id, 1);
//! ```

use std::path::{Path, PathBuf};

use rusqlite::{Connection, ErrorCode, params};
use tracing::{debug, info, warn};
use userbase_core::{NewUser, User, UserTable};

use crate::error::{Result, SessionError};
use crate::schema::{
    CREATE_USERS_TABLE_SQL, INSERT_USER_SQL, SELECT_USERS_SQL, TABLE_EXISTS_SQL, USERS_TABLE,
};

/// An open database session.
///
/// The session exclusively owns its connection. Dropping it closes the
/// connection; [`close`](Self::close) does the same but reports failures.
#[derive(Debug)]
pub struct Session {
    conn: Connection,
    path: PathBuf,
}

impl Session {
    /// Opens or creates the database file at `path`.
    ///
    /// The file header is read immediately, so a file that exists but is not
    /// a SQLite database fails here rather than on the first query.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ConnectionError`] if the file cannot be opened
    /// or created (missing directory, no permission) or is not a database.
    pub fn connect(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let connection_error = |source| SessionError::ConnectionError {
            path: path.clone(),
            source,
        };

        let conn = Connection::open(&path).map_err(connection_error)?;
        conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        })
        .map_err(connection_error)?;

        info!(path = %path.display(), "Opened database");
        Ok(Self { conn, path })
    }

    /// Opens a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ConnectionError`] if SQLite cannot allocate
    /// the database.
    pub fn open_in_memory() -> Result<Self> {
        let path = PathBuf::from(":memory:");
        let conn = Connection::open_in_memory().map_err(|source| {
            SessionError::ConnectionError {
                path: path.clone(),
                source,
            }
        })?;
        debug!("Opened in-memory database");
        Ok(Self { conn, path })
    }

    /// Creates the `users` table if it does not exist.
    ///
    /// Uses `CREATE TABLE IF NOT EXISTS`, so it is safe to call on every
    /// startup. Executes within a transaction.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::SchemaError`] on storage faults such as a
    /// read-only database.
    pub fn ensure_schema(&mut self) -> Result<()> {
        let schema_error = |source| SessionError::SchemaError {
            table: USERS_TABLE,
            source,
        };

        let tx = self.conn.transaction().map_err(schema_error)?;
        tx.execute_batch(CREATE_USERS_TABLE_SQL).map_err(schema_error)?;
        tx.commit().map_err(schema_error)?;

        debug!(table = USERS_TABLE, "Table ensured");
        Ok(())
    }

    /// Inserts each record with its own parameterized statement.
    ///
    /// Rows run in autocommit mode: a row that violates a constraint (for
    /// example a duplicate email) is recorded in the returned report and the
    /// remaining rows are still attempted. Rows already inserted are never
    /// rolled back.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InsertError`] if the statement cannot be
    /// prepared (e.g. the table is missing) or a row fails for any reason
    /// other than a constraint violation. Rows inserted before the failure
    /// remain.
    pub fn insert_records(&self, records: &[NewUser]) -> Result<InsertReport> {
        let mut stmt = self
            .conn
            .prepare(INSERT_USER_SQL)
            .map_err(SessionError::InsertError)?;

        let mut report = InsertReport {
            attempted: records.len(),
            ..InsertReport::default()
        };

        for (index, record) in records.iter().enumerate() {
            match stmt.execute(params![record.name, record.age, record.email]) {
                Ok(_) => report.inserted += 1,
                Err(err) if is_constraint_violation(&err) => {
                    warn!(index, email = %record.email, error = %err, "Row rejected");
                    report.failures.push(RowFailure {
                        index,
                        email: record.email.clone(),
                        message: err.to_string(),
                    });
                }
                Err(err) => return Err(SessionError::InsertError(err)),
            }
        }

        debug!(
            attempted = report.attempted,
            inserted = report.inserted,
            "Insert finished"
        );
        Ok(report)
    }

    /// Reads every row of the `users` table, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::QueryError`] if the table does not exist or a
    /// row cannot be decoded.
    pub fn fetch_all(&self) -> Result<UserTable> {
        let mut stmt = self
            .conn
            .prepare(SELECT_USERS_SQL)
            .map_err(SessionError::QueryError)?;

        let rows = stmt
            .query_map([], |row| {
                Ok(User {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    age: row.get(2)?,
                    email: row.get(3)?,
                })
            })
            .map_err(SessionError::QueryError)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(SessionError::QueryError)?;

        debug!(rows = rows.len(), "Fetched rows");
        Ok(UserTable::from_rows(rows))
    }

    /// Reports whether the `users` table exists and how many rows it holds.
    pub fn status(&self) -> Result<SessionStatus> {
        let tables: i64 = self
            .conn
            .query_row(TABLE_EXISTS_SQL, [USERS_TABLE], |row| row.get(0))?;
        if tables == 0 {
            return Ok(SessionStatus {
                table_exists: false,
                user_count: 0,
            });
        }

        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {USERS_TABLE}"), [], |row| {
                row.get(0)
            })?;
        Ok(SessionStatus {
            table_exists: true,
            user_count: usize::try_from(count).unwrap_or_default(),
        })
    }

    /// Path the session was opened with (`:memory:` for in-memory sessions).
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Closes the connection, reporting any failure.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::DatabaseError`] if SQLite refuses to close the
    /// handle. The connection is dropped either way.
    pub fn close(self) -> Result<()> {
        let path = self.path;
        self.conn.close().map_err(|(_conn, err)| err)?;
        debug!(path = %path.display(), "Closed database");
        Ok(())
    }
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    err.sqlite_error_code() == Some(ErrorCode::ConstraintViolation)
}

/// Outcome of [`Session::insert_records`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertReport {
    /// Number of records submitted.
    pub attempted: usize,
    /// Number of rows actually inserted.
    pub inserted: usize,
    /// Records rejected by a constraint, in submission order.
    pub failures: Vec<RowFailure>,
}

impl InsertReport {
    /// Returns `true` if every submitted record was inserted.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.inserted == self.attempted
    }
}

/// A single record rejected during a bulk insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFailure {
    /// Zero-based position of the record in the submitted slice.
    pub index: usize,
    /// Email of the rejected record.
    pub email: String,
    /// Driver message describing the violation.
    pub message: String,
}

/// Snapshot returned by [`Session::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStatus {
    /// Whether the `users` table exists.
    pub table_exists: bool,
    /// Number of rows in the table (0 if it does not exist).
    pub user_count: usize,
}
