//! End-to-end runs: metadata rows -> graph -> plan -> engine -> report.

use std::collections::BTreeMap;
use std::path::PathBuf;

use fixload_core::error::LoadResult;
use fixload_core::{DependencyGraph, DependencyRow, Fixture, FixtureSet, Loader, TableName};
use fixload_engine::{EngineError, LoadEngine, topological_sort};

/// Loader that fails scripted tables a number of times, recording call order.
#[derive(Default)]
struct Scripted {
    failures_left: BTreeMap<String, u32>,
    calls: Vec<String>,
}

impl Loader for Scripted {
    fn load_batch(&mut self, batch: &[Fixture]) -> LoadResult<()> {
        self.calls
            .push(format!("batch:{}", join(batch.iter().map(|f| f.table.as_str()))));
        for fixture in batch {
            if let Some(left) = self.failures_left.get_mut(fixture.table.as_str()) {
                if *left > 0 {
                    *left -= 1;
                    return Err(fixload_core::LoadError::new(
                        fixture.table.as_str(),
                        "scripted failure",
                    ));
                }
            }
        }
        Ok(())
    }

    fn load_one(&mut self, fixture: &Fixture) -> LoadResult<()> {
        self.calls.push(format!("one:{}", fixture.table));
        if let Some(left) = self.failures_left.get_mut(fixture.table.as_str()) {
            if *left > 0 {
                *left -= 1;
                return Err(fixload_core::LoadError::new(
                    fixture.table.as_str(),
                    "scripted failure",
                ));
            }
        }
        Ok(())
    }
}

fn join<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts.collect::<Vec<_>>().join(",")
}

fn fixtures_for(tables: &[&str]) -> FixtureSet {
    FixtureSet::from_paths(
        tables
            .iter()
            .map(|t| PathBuf::from(format!("app/fixtures/{t}.json"))),
    )
}

#[test]
fn acyclic_graph_loads_as_one_ordered_batch() {
    let graph = DependencyGraph::from_rows([
        DependencyRow::new("a", "b"),
        DependencyRow::new("b", "c"),
        DependencyRow::without_reference("c"),
    ]);
    let plan = topological_sort(&graph);
    let fixtures = fixtures_for(&["a", "b", "c"]);

    let mut loader = Scripted::default();
    let report = LoadEngine::new()
        .run(&plan, &fixtures, &mut loader)
        .unwrap();

    assert_eq!(loader.calls, vec!["batch:c,b,a"]);
    assert_eq!(report.rounds, 0);
    assert!(report.cyclic.is_empty());
}

#[test]
fn tables_without_fixture_files_are_skipped() {
    // Graph knows a, b, c; only a and c have files. The resolved batch is
    // [c, a] with b silently dropped.
    let graph = DependencyGraph::from_rows([
        DependencyRow::new("a", "b"),
        DependencyRow::new("b", "c"),
        DependencyRow::without_reference("c"),
    ]);
    let plan = topological_sort(&graph);
    let fixtures = fixtures_for(&["a", "c"]);

    let mut loader = Scripted::default();
    LoadEngine::new()
        .run(&plan, &fixtures, &mut loader)
        .unwrap();

    assert_eq!(loader.calls, vec!["batch:c,a"]);
}

#[test]
fn fixture_for_reference_only_table_is_loaded_first() {
    // "users" appears in the metadata only as a referenced table; its
    // fixture must still load, ahead of the table that references it.
    let graph = DependencyGraph::from_rows([DependencyRow::new("orders", "users")]);
    let plan = topological_sort(&graph);
    let fixtures = fixtures_for(&["orders", "users"]);

    let mut loader = Scripted::default();
    let report = LoadEngine::new()
        .run(&plan, &fixtures, &mut loader)
        .unwrap();

    assert_eq!(loader.calls, vec!["batch:users,orders"]);
    assert_eq!(
        report.ordered,
        vec![TableName::new("users"), TableName::new("orders")]
    );
}

#[test]
fn cycle_is_loaded_individually_and_converges() {
    // d is acyclic; a <-> b cycle with b needing two attempts.
    let graph = DependencyGraph::from_rows([
        DependencyRow::new("a", "b"),
        DependencyRow::new("b", "a"),
        DependencyRow::without_reference("d"),
    ]);
    let plan = topological_sort(&graph);
    let fixtures = fixtures_for(&["a", "b", "d"]);

    let mut loader = Scripted::default();
    loader.failures_left.insert("b".to_string(), 1);

    let report = LoadEngine::new()
        .run(&plan, &fixtures, &mut loader)
        .unwrap();

    assert_eq!(loader.calls, vec!["batch:d", "one:a", "one:b", "one:b"]);
    assert_eq!(report.rounds, 2);
    assert_eq!(
        report.cyclic,
        vec![TableName::new("a"), TableName::new("b")]
    );
}

#[test]
fn self_referencing_table_goes_through_retry_path() {
    let graph = DependencyGraph::from_rows([DependencyRow::new("employees", "employees")]);
    let plan = topological_sort(&graph);
    let fixtures = fixtures_for(&["employees"]);

    let mut loader = Scripted::default();
    let report = LoadEngine::new()
        .run(&plan, &fixtures, &mut loader)
        .unwrap();

    assert_eq!(loader.calls, vec!["one:employees"]);
    assert_eq!(report.rounds, 1);
}

#[test]
fn exhausted_retries_report_exactly_the_stubborn_tables() {
    let graph = DependencyGraph::from_rows([
        DependencyRow::new("a", "b"),
        DependencyRow::new("b", "a"),
    ]);
    let plan = topological_sort(&graph);
    let fixtures = fixtures_for(&["a", "b"]);

    let mut loader = Scripted::default();
    loader.failures_left.insert("b".to_string(), u32::MAX);

    let err = LoadEngine::new()
        .with_max_attempts(2)
        .run(&plan, &fixtures, &mut loader)
        .unwrap_err();

    match err {
        EngineError::RetryExhausted { pending, attempts } => {
            assert_eq!(pending, vec![TableName::new("b")]);
            assert_eq!(attempts, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
    // Two full rounds ran; "a" succeeded in round 1 and stayed loaded.
    assert_eq!(loader.calls, vec!["one:a", "one:b", "one:b"]);
}

#[test]
fn ordered_batch_failure_stops_before_cyclic_loading() {
    let graph = DependencyGraph::from_rows([
        DependencyRow::without_reference("d"),
        DependencyRow::new("a", "b"),
        DependencyRow::new("b", "a"),
    ]);
    let plan = topological_sort(&graph);
    let fixtures = fixtures_for(&["a", "b", "d"]);

    let mut loader = Scripted::default();
    loader.failures_left.insert("d".to_string(), 1);

    let err = LoadEngine::new()
        .run(&plan, &fixtures, &mut loader)
        .unwrap_err();

    assert!(matches!(err, EngineError::Batch(_)));
    assert_eq!(loader.calls, vec!["batch:d"]);
}
