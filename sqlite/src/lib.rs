//! SQLite session for the userbase `users` table.
//!
//! A [`Session`] owns exactly one [`rusqlite::Connection`] and exposes the
//! four operations the CLI runs in a fixed order:
//!
//! 1. [`Session::connect`] — open or create the database file
//! 2. [`Session::ensure_schema`] — idempotent `CREATE TABLE IF NOT EXISTS`
//! 3. [`Session::insert_records`] — one parameterized insert per record
//! 4. [`Session::fetch_all`] — materialize every row into a
//!    [`UserTable`](userbase_core::UserTable)
//!
//! # Quick start
//!
//! ```no_run
//! use userbase_core::sample_users;
//! use userbase_sqlite::Session;
//!
//! let mut session = Session::connect("database.db").unwrap();
//! session.ensure_schema().unwrap();
//!
//! let report = session.insert_records(&sample_users()).unwrap();
//! println!("{} attempted, {} inserted", report.attempted, report.inserted);
//!
//! let table = session.fetch_all().unwrap();
//! println!("{table}");
//!
//! session.close().unwrap();
//! ```
//!
//! # Failure model
//!
//! Each insert runs in SQLite's autocommit mode. A row that violates the
//! `email` uniqueness constraint is recorded in the [`InsertReport`] and the
//! remaining rows are still attempted; rows inserted earlier in the same call
//! stay committed.

mod error;
mod schema;
mod session;

pub use error::{Result, SessionError};
pub use schema::{CREATE_USERS_TABLE_SQL, USERS_TABLE};
pub use session::{InsertReport, RowFailure, Session, SessionStatus};
