//! YAML seed files that replace the built-in dataset.
//!
//! # Example YAML
//!
//! ```yaml
//! users:
//!   - name: Alex
//!     age: 28
//!     email: a@x.com
//!   - name: Maria
//!     email: m@x.com
//! ```

use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::NewUser;
use crate::error::Result;

/// A list of user records loaded from a YAML file.
///
/// # Examples
///
/// ```
/// use userbase_core::SeedFile;
///
/// let seed = SeedFile::from_yaml_str("users:\n  - name: Alex\n    age: 28\n    email: a@x.com\n").unwrap();
/// assert_eq!(seed.users.len(), 1);
/// assert_eq!(seed.users[0].age, Some(28));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedFile {
    /// Records to insert, in order.
    #[serde(default)]
    pub users: Vec<NewUser>,
}

impl SeedFile {
    /// Loads a seed file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](crate::CoreError::Io) if the file cannot be read, or
    /// [`Yaml`](crate::CoreError::Yaml) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let seed = serde_yaml::from_reader(reader)?;
        Ok(seed)
    }

    /// Parses a seed file from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Consumes the seed file and returns its records.
    pub fn into_users(self) -> Vec<NewUser> {
        self.users
    }
}
