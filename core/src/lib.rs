//! Core record types for the userbase workspace.
//!
//! This crate defines everything about a user record that does not depend on
//! a storage engine:
//!
//! - [`NewUser`] — the payload inserted into the `users` table.
//! - [`User`] — a row read back, including its auto-assigned id.
//! - [`UserTable`] — an ordered, in-memory table of rows with a
//!   dataframe-style [`Display`](std::fmt::Display) rendering.
//! - [`sample_users`] — the built-in dataset the CLI seeds on every run.
//! - [`SeedFile`] — a YAML file that replaces the built-in dataset.
//!
//! # Example
//!
//! ```
//! use userbase_core::*;
//!
//! let users = sample_users();
//! assert_eq!(users.len(), 3);
//!
//! let table = UserTable::from_rows(vec![User {
//!     id: 1,
//!     name: users[0].name.clone(),
//!     age: users[0].age,
//!     email: Some(users[0].email.clone()),
//! }]);
//! assert!(table.to_string().contains("aleksey@example.com"));
//! ```

mod error;
mod sample;
mod seed;
mod table;
mod types;

pub use error::{CoreError, Result};
pub use sample::sample_users;
pub use seed::SeedFile;
pub use table::{COLUMNS, UserTable};
pub use types::{NewUser, User};
