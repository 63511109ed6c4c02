//! In-memory tabular result of a full-table read.
//!
//! [`UserTable`] keeps rows in the order the database returned them and
//! renders like a dataframe: a header line, then one line per row prefixed
//! with its zero-based position. Every cell is right-aligned to the widest
//! value in its column.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::User;

/// Column names, in display order.
pub const COLUMNS: [&str; 4] = ["id", "name", "age", "email"];

const MISSING: &str = "None";

/// Ordered rows of the `users` table.
///
/// # Examples
///
/// ```
/// use userbase_core::{User, UserTable};
///
/// let table = UserTable::from_rows(vec![User {
///     id: 1,
///     name: "Alex".into(),
///     age: None,
///     email: Some("a@x.com".into()),
/// }]);
///
/// let rendered = table.to_string();
/// assert_eq!(rendered.lines().count(), 2);
/// assert!(rendered.contains("None"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserTable {
    rows: Vec<User>,
}

impl UserTable {
    /// Creates a table from rows already in display order.
    pub fn from_rows(rows: Vec<User>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in display order.
    pub fn rows(&self) -> &[User] {
        &self.rows
    }

    /// Iterates over rows in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, User> {
        self.rows.iter()
    }

    /// Consumes the table and returns its rows.
    pub fn into_rows(self) -> Vec<User> {
        self.rows
    }

    fn cells(user: &User) -> [String; 4] {
        [
            user.id.to_string(),
            user.name.clone(),
            user.age.map_or_else(|| MISSING.to_string(), |age| age.to_string()),
            user.email.clone().unwrap_or_else(|| MISSING.to_string()),
        ]
    }
}

impl<'a> IntoIterator for &'a UserTable {
    type Item = &'a User;
    type IntoIter = std::slice::Iter<'a, User>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl fmt::Display for UserTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            writeln!(f, "Empty table")?;
            writeln!(f, "Columns: [{}]", COLUMNS.join(", "))?;
            return write!(f, "Index: []");
        }

        let body: Vec<[String; 4]> = self.rows.iter().map(Self::cells).collect();

        // chars().count() keeps non-ASCII names aligned.
        let mut widths = COLUMNS.map(|c| c.chars().count());
        for row in &body {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }
        let index_width = (self.rows.len() - 1).to_string().len();

        write!(f, "{:index_width$}", "")?;
        for (name, width) in COLUMNS.iter().zip(widths) {
            write!(f, "  {name:>width$}")?;
        }

        for (index, row) in body.iter().enumerate() {
            writeln!(f)?;
            write!(f, "{index:<index_width$}")?;
            for (cell, width) in row.iter().zip(widths) {
                write!(f, "  {cell:>width$}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, name: &str, age: Option<i64>, email: Option<&str>) -> User {
        User {
            id,
            name: name.to_string(),
            age,
            email: email.map(str::to_string),
        }
    }

    #[test]
    fn test_empty_table_lists_columns() {
        let rendered = UserTable::default().to_string();
        assert!(rendered.starts_with("Empty table"));
        assert!(rendered.contains("Columns: [id, name, age, email]"));
    }

    #[test]
    fn test_columns_are_right_aligned() {
        let table = UserTable::from_rows(vec![
            user(1, "Alex", Some(28), Some("a@x.com")),
            user(2, "Maria", Some(34), Some("maria@example.com")),
        ]);
        let rendered = table.to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "   id   name  age              email");
        assert_eq!(lines[1], "0   1   Alex   28            a@x.com");
        assert_eq!(lines[2], "1   2  Maria   34  maria@example.com");
    }

    #[test]
    fn test_missing_values_render_as_none() {
        let table = UserTable::from_rows(vec![user(7, "Ivan", None, None)]);
        let rendered = table.to_string();
        let row = rendered.lines().nth(1).unwrap();
        assert_eq!(row.matches("None").count(), 2);
    }

    #[test]
    fn test_non_ascii_names_align_by_char() {
        let table = UserTable::from_rows(vec![
            user(1, "Иван", Some(45), Some("i@x.com")),
            user(2, "Al", Some(5), Some("a@x.com")),
        ]);
        let rendered = table.to_string();
        let widths: Vec<usize> = rendered.lines().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|w| *w == widths[0]));
    }

    #[test]
    fn test_serializes_as_row_list() {
        let table = UserTable::from_rows(vec![user(1, "Alex", Some(28), Some("a@x.com"))]);
        let json = serde_json::to_value(&table).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["name"], "Alex");
    }
}
