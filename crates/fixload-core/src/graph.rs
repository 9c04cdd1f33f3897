//! Dependency graph between record collections.
//!
//! The graph is built from foreign-key metadata rows as produced by a schema
//! catalog query such as:
//!
//! ```sql
//! SELECT
//!   TABLE_NAME AS table_name,
//!   REFERENCED_TABLE_NAME AS reference_table_name
//! FROM
//!   information_schema.KEY_COLUMN_USAGE
//! ```
//!
//! Where that metadata comes from is a collaborator concern; the graph only
//! cares about the rows. A row whose `reference_table_name` is null (a
//! non-foreign-key column) registers the table without adding an edge.
//!
//! # Design
//!
//! Adjacency is a map from table to its dependency *set*: duplicate rows
//! collapse, edge order is irrelevant. Both the map and the sets are B-tree
//! based, so iteration is lexicographic by table name. That ordering is the
//! documented tie-break the engine relies on for reproducible plans.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::TableName;

/// One row of foreign-key metadata.
///
/// `reference_table_name` is `None` for rows describing non-referencing
/// columns (e.g. a primary key constraint); such rows still register the
/// table in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRow {
    /// The table the constraint row belongs to.
    pub table_name: String,
    /// The table it references, if the row describes a foreign key.
    #[serde(default)]
    pub reference_table_name: Option<String>,
}

impl DependencyRow {
    /// Creates a row with a foreign-key reference.
    pub fn new(table: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            table_name: table.into(),
            reference_table_name: Some(reference.into()),
        }
    }

    /// Creates a row without a reference (non-foreign-key constraint).
    pub fn without_reference(table: impl Into<String>) -> Self {
        Self {
            table_name: table.into(),
            reference_table_name: None,
        }
    }
}

/// A directed dependency graph between tables.
///
/// An edge `A -> B` means "A depends on B": B's rows must be inserted before
/// A's. Self-edges are permitted — they are how a self-referencing foreign
/// key (e.g. `employees.manager_id`) shows up, and the engine routes such
/// tables into the cyclic remainder rather than failing.
///
/// # Example
///
/// ```
/// use fixload_core::{DependencyGraph, DependencyRow, TableName};
///
/// let graph = DependencyGraph::from_rows([
///     DependencyRow::new("orders", "users"),
///     DependencyRow::new("orders", "products"),
///     DependencyRow::without_reference("users"),
/// ]);
///
/// assert_eq!(graph.len(), 3);
/// assert!(graph.dependencies_of(&TableName::new("users")).unwrap().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyGraph {
    nodes: BTreeMap<TableName, BTreeSet<TableName>>,
}

impl DependencyGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from metadata rows.
    ///
    /// Infallible: duplicate rows are idempotent, null references only
    /// register the table. Every table that appears at least once — as
    /// `table_name` or as a reference — gets an entry; tables with no
    /// dependency rows of their own get an empty set, so a fixture for a
    /// table that is only ever referenced still gets a plan slot.
    pub fn from_rows(rows: impl IntoIterator<Item = DependencyRow>) -> Self {
        let mut graph = Self::new();
        for row in rows {
            let table = TableName::from(row.table_name);
            let reference = row.reference_table_name.map(TableName::from);
            match reference {
                Some(dep) => graph.add_dependency(table, dep),
                None => graph.add_table(table),
            }
        }
        graph
    }

    /// Registers a table with no dependencies (keeps existing edges if any).
    pub fn add_table(&mut self, table: TableName) {
        self.nodes.entry(table).or_default();
    }

    /// Adds an edge: `table` depends on `dependency`.
    ///
    /// Idempotent. The dependency is registered as a node as well (with an
    /// empty set if new) — a table known only through references must still
    /// be orderable and loadable. Self-edges are accepted; cycle detection
    /// is deliberately not done here — the engine's topological sort
    /// isolates cycles instead.
    pub fn add_dependency(&mut self, table: TableName, dependency: TableName) {
        self.nodes.entry(dependency.clone()).or_default();
        self.nodes.entry(table).or_default().insert(dependency);
    }

    /// Number of tables in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no tables are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if the table is registered.
    #[must_use]
    pub fn contains(&self, table: &TableName) -> bool {
        self.nodes.contains_key(table)
    }

    /// Returns the dependency set of a table, if registered.
    #[must_use]
    pub fn dependencies_of(&self, table: &TableName) -> Option<&BTreeSet<TableName>> {
        self.nodes.get(table)
    }

    /// Iterates over `(table, dependencies)` in lexicographic table order.
    pub fn iter(&self) -> impl Iterator<Item = (&TableName, &BTreeSet<TableName>)> {
        self.nodes.iter()
    }

    /// Iterates over table names in lexicographic order.
    pub fn tables(&self) -> impl Iterator<Item = &TableName> {
        self.nodes.keys()
    }
}
