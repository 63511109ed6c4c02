//! DDL for the `users` table.

/// Name of the only table the session manages.
pub const USERS_TABLE: &str = "users";

/// Idempotent statement creating the `users` table.
///
/// `email` is `UNIQUE` but nullable, matching the layout of existing
/// database files.
pub const CREATE_USERS_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    age INTEGER,
    email TEXT UNIQUE
);
"#;

pub(crate) const INSERT_USER_SQL: &str = "INSERT INTO users (name, age, email) VALUES (?1, ?2, ?3)";

pub(crate) const SELECT_USERS_SQL: &str = "SELECT id, name, age, email FROM users ORDER BY id";

pub(crate) const TABLE_EXISTS_SQL: &str =
    "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1";
