//! Fixture files and the table-to-file mapping.
//!
//! A fixture is one data file worth of records for one table. Discovery of
//! fixture files (directory walking, glob matching) happens in the CLI; this
//! module only defines the mapping and its duplicate-resolution rule:
//! **first discovered path wins**, and discovery order must be lexicographic,
//! so the winner is deterministic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::TableName;

/// One loadable unit: a table and the data file holding its records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    /// Table the records belong to.
    pub table: TableName,
    /// Path to the data file.
    pub path: PathBuf,
}

impl Fixture {
    /// Creates a fixture.
    pub fn new(table: impl Into<TableName>, path: impl Into<PathBuf>) -> Self {
        Self {
            table: table.into(),
            path: path.into(),
        }
    }
}

/// Mapping from table name to its single fixture file.
///
/// Not every table in the dependency graph has a fixture, and a fixture's
/// table does not have to appear in the graph. The engine resolves plan
/// entries through [`FixtureSet::get`] and silently skips tables without one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureSet {
    paths: BTreeMap<TableName, PathBuf>,
}

impl FixtureSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from paths, mapping each file to its stem.
    ///
    /// Paths must already be in discovery order (sorted lexicographically by
    /// the caller); the first path per stem wins. Paths without a UTF-8 stem
    /// are skipped.
    pub fn from_paths(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut set = Self::new();
        for path in paths {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            set.insert_first(TableName::new(stem), path);
        }
        set
    }

    /// Inserts a mapping unless the table already has one.
    pub fn insert_first(&mut self, table: TableName, path: PathBuf) {
        self.paths.entry(table).or_insert(path);
    }

    /// Returns the fixture path for a table, if any.
    #[must_use]
    pub fn get(&self, table: &TableName) -> Option<&Path> {
        self.paths.get(table).map(PathBuf::as_path)
    }

    /// Resolves an ordered list of tables to fixtures, skipping tables
    /// without a file. Output preserves the input order.
    pub fn resolve<'a>(&self, tables: impl IntoIterator<Item = &'a TableName>) -> Vec<Fixture> {
        tables
            .into_iter()
            .filter_map(|t| {
                self.paths
                    .get(t)
                    .map(|p| Fixture::new(t.clone(), p.clone()))
            })
            .collect()
    }

    /// Number of mapped tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns true if no fixtures are mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
