//! The load engine: executes a [`LoadPlan`] against a [`Loader`].
//!
//! Execution is synchronous and single-threaded. The ordered portion goes to
//! the loader as one batch — its internal order already satisfies every
//! dependency edge, so one pass is safe. The cyclic remainder is attempted
//! one fixture at a time in bounded retry rounds: a round's failures become
//! the next round's pending set, and a failure mid-round never aborts the
//! round's remaining fixtures.

use serde::Serialize;
use tracing::{debug, info, warn};

use fixload_core::{Fixture, FixtureSet, Loader, TableName};

use crate::error::{EngineError, EngineResult};
use crate::plan::LoadPlan;
use crate::retry::RetryState;

/// Default bound on cyclic retry rounds.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Summary of a completed load run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Tables loaded as the ordered batch.
    pub ordered: Vec<TableName>,
    /// Cyclic-remainder tables loaded by the retry loop.
    pub cyclic: Vec<TableName>,
    /// Retry rounds consumed (0 when the remainder had no fixtures).
    pub rounds: u32,
}

/// Drives a loader through a load plan.
///
/// # Example
///
/// ```
/// use fixload_engine::LoadEngine;
///
/// let engine = LoadEngine::new().with_max_attempts(3);
/// assert_eq!(engine.max_attempts(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct LoadEngine {
    max_attempts: u32,
}

impl Default for LoadEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadEngine {
    /// Creates an engine with [`DEFAULT_MAX_ATTEMPTS`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Sets the bound on cyclic retry rounds.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Returns the bound on cyclic retry rounds.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Executes a plan: ordered batch first, then the cyclic retry loop.
    ///
    /// Plan entries without a fixture file are skipped silently — the graph
    /// regularly knows tables that have no data to load. The resolved order
    /// and cyclic set are logged before any loading starts.
    pub fn run(
        &self,
        plan: &LoadPlan,
        fixtures: &FixtureSet,
        mut loader: impl Loader,
    ) -> EngineResult<LoadReport> {
        let ordered = fixtures.resolve(&plan.ordered);
        let cyclic = fixtures.resolve(&plan.cyclic);

        info!(
            target: "fixload::engine",
            ordered = ordered.len(),
            cyclic = cyclic.len(),
            "resolved load plan"
        );
        info!(target: "fixload::engine", tables = ?tables_of(&ordered), "ordered fixtures");
        info!(target: "fixload::engine", tables = ?tables_of(&cyclic), "cyclic fixtures");

        self.load_ordered(&ordered, &mut loader)?;
        let rounds = self.load_cyclic_with_retry(cyclic.clone(), &mut loader)?;

        Ok(LoadReport {
            ordered: tables_of(&ordered),
            cyclic: tables_of(&cyclic),
            rounds,
        })
    }

    /// Loads the resolved ordered fixtures in a single batched invocation.
    ///
    /// A failure here is fatal and propagates; nothing about the acyclic
    /// batch is retried.
    pub fn load_ordered(
        &self,
        batch: &[Fixture],
        mut loader: impl Loader,
    ) -> EngineResult<()> {
        if batch.is_empty() {
            return Ok(());
        }
        loader.load_batch(batch)?;
        info!(target: "fixload::engine", count = batch.len(), "ordered batch loaded");
        Ok(())
    }

    /// Loads cyclic-remainder fixtures with up to `max_attempts` rounds.
    ///
    /// Each round attempts every pending fixture individually; the failures
    /// become the next round's pending set. Returns the number of rounds
    /// consumed, or [`EngineError::RetryExhausted`] naming exactly the
    /// fixtures that never loaded.
    pub fn load_cyclic_with_retry(
        &self,
        mut pending: Vec<Fixture>,
        mut loader: impl Loader,
    ) -> EngineResult<u32> {
        let mut state = RetryState::initial(pending.len(), self.max_attempts);
        let mut rounds = 0;

        while let RetryState::Pending(round) = state {
            rounds = round;
            let mut failed = Vec::new();

            for fixture in &pending {
                match loader.load_one(fixture) {
                    Ok(()) => {
                        debug!(
                            target: "fixload::engine",
                            table = %fixture.table,
                            round,
                            "cyclic fixture loaded"
                        );
                    }
                    Err(err) => {
                        warn!(
                            target: "fixload::engine",
                            table = %fixture.table,
                            round,
                            error = %err,
                            "cyclic fixture failed; requeueing"
                        );
                        failed.push(fixture.clone());
                    }
                }
            }

            state = state.after_round(failed.len(), self.max_attempts);
            pending = failed;
        }

        match state {
            RetryState::Succeeded => Ok(rounds),
            _ => Err(EngineError::retry_exhausted(
                tables_of(&pending),
                self.max_attempts,
            )),
        }
    }
}

fn tables_of(fixtures: &[Fixture]) -> Vec<TableName> {
    fixtures.iter().map(|f| f.table.clone()).collect()
}
