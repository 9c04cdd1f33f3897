//! Topological ordering of the dependency graph.
//!
//! Kahn's algorithm over the dependency graph, with two deliberate twists:
//!
//! - Cycles do not fail the sort. Tables whose in-degree never reaches zero
//!   are collected into the plan's cyclic remainder for the retry loop to
//!   handle; that includes self-referencing tables, which can never be freed
//!   by edge removal.
//! - Tables known only as a reference are zero-in-degree nodes: the graph
//!   builder registers them, so they seed the queue and load before their
//!   dependents. Should a dependency be missing from the node map anyway (a
//!   graph assembled by hand or deserialized), the edge counts as already
//!   satisfied rather than wedging the dependent into the remainder.
//!
//! Tie-breaks are lexicographic by table name (the graph iterates in that
//! order), so the plan is reproducible for a given graph.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

use fixload_core::{DependencyGraph, TableName};

/// The execution plan: what can be loaded in order, and what cannot.
///
/// Invariants: `ordered.len() + cyclic.len() == graph.len()`, and for every
/// edge `A -> B` with both endpoints in `ordered`, B precedes A.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadPlan {
    /// Tables in dependency-safe load order.
    pub ordered: Vec<TableName>,
    /// Tables in, or downstream of, a dependency cycle; lexicographic order.
    pub cyclic: Vec<TableName>,
}

impl LoadPlan {
    /// Total number of tables covered by the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len() + self.cyclic.len()
    }

    /// Returns true if the plan covers no tables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty() && self.cyclic.is_empty()
    }

    /// Returns true if topological ordering resolved every table.
    #[must_use]
    pub fn is_fully_ordered(&self) -> bool {
        self.cyclic.is_empty()
    }
}

/// Computes a load plan for the graph with Kahn's algorithm.
///
/// In-degree of a table counts only dependencies that are themselves graph
/// nodes. The queue is seeded with zero-in-degree tables in lexicographic
/// order; draining a table decrements each dependent and enqueues those that
/// reach zero. Whatever keeps positive in-degree when the queue empties is
/// cyclic (or downstream of a cycle) and lands in the remainder.
#[must_use]
pub fn topological_sort(graph: &DependencyGraph) -> LoadPlan {
    let mut in_degree: BTreeMap<&TableName, usize> = BTreeMap::new();
    // Reverse adjacency: dep -> tables it unblocks when loaded.
    let mut unblocks: BTreeMap<&TableName, Vec<&TableName>> = BTreeMap::new();

    for (table, deps) in graph.iter() {
        let mut degree = 0;
        for dep in deps {
            if graph.contains(dep) {
                degree += 1;
                unblocks.entry(dep).or_default().push(table);
            }
        }
        in_degree.insert(table, degree);
    }

    let mut queue: VecDeque<&TableName> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(table, _)| *table)
        .collect();

    let mut ordered = Vec::with_capacity(graph.len());
    while let Some(table) = queue.pop_front() {
        ordered.push(table.clone());
        if let Some(dependents) = unblocks.get(table) {
            for dependent in dependents {
                if let Some(degree) = in_degree.get_mut(dependent) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(*dependent);
                    }
                }
            }
        }
    }

    let cyclic: Vec<TableName> = in_degree
        .iter()
        .filter(|(_, degree)| **degree > 0)
        .map(|(table, _)| (*table).clone())
        .collect();

    LoadPlan { ordered, cyclic }
}
