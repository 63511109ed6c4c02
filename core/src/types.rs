//! User record type definitions.
//!
//! A user lives in a single `users` table. [`NewUser`] is what callers hand
//! to the storage layer; [`User`] is what comes back once the database has
//! assigned an id.

use serde::{Deserialize, Serialize};

/// A user record that has not been stored yet.
///
/// The id is assigned by the database on insert, so it is absent here.
///
/// # Examples
///
/// ```
/// use userbase_core::NewUser;
///
/// let user = NewUser::new("Alex", Some(28), "a@x.com");
/// assert_eq!(user.name, "Alex");
/// assert_eq!(user.age, Some(28));
///
/// let unknown_age = NewUser::new("Maria", None, "m@x.com");
/// assert!(unknown_age.age.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Display name (required).
    pub name: String,
    /// Age in years, if known.
    #[serde(default)]
    pub age: Option<i64>,
    /// Contact email; unique across the table.
    pub email: String,
}

impl NewUser {
    /// Creates a new insert payload.
    pub fn new(name: impl Into<String>, age: Option<i64>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            email: email.into(),
        }
    }
}

impl<N, E> From<(N, i64, E)> for NewUser
where
    N: Into<String>,
    E: Into<String>,
{
    fn from((name, age, email): (N, i64, E)) -> Self {
        Self::new(name, Some(age), email)
    }
}

/// A user row as stored in the database.
///
/// `email` is optional here even though [`NewUser`] requires it: the column
/// is `UNIQUE` but nullable, and rows written by other tools must still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Auto-assigned primary key.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Age in years, if known.
    pub age: Option<i64>,
    /// Contact email, if present.
    pub email: Option<String>,
}

impl User {
    /// Returns `true` if this row carries the same field values as `new`.
    ///
    /// The id is ignored.
    pub fn matches(&self, new: &NewUser) -> bool {
        self.name == new.name
            && self.age == new.age
            && self.email.as_deref() == Some(new.email.as_str())
    }
}
