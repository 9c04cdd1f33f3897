//! Table identifier type.
//!
//! A [`TableName`] uniquely identifies a loadable record collection. It is the
//! key used everywhere: in the dependency graph, in the fixture map, and in
//! failure reports. Names compare by value and order lexicographically, which
//! is what makes plan output reproducible across runs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a record collection (a database table).
///
/// Fixture files map to tables by file stem, so `app/fixtures/users.json`
/// names the table `users`.
///
/// # Examples
///
/// ```
/// use fixload_core::TableName;
///
/// let table = TableName::new("users");
/// assert_eq!(table.as_str(), "users");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableName(String);

impl TableName {
    /// Creates a table name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TableName({})", self.0)
    }
}

impl From<&str> for TableName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TableName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for TableName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
