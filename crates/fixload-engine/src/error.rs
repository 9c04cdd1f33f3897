//! Error types for the ordering and retry engine.

use thiserror::Error;

use fixload_core::{LoadError, TableName};

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that terminate a load run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// The ordered (acyclic) batch failed. Never retried: its internal order
    /// already satisfies every dependency, so a failure here is a collaborator
    /// defect, not a cycle artifact.
    #[error("ordered batch load failed: {0}")]
    Batch(#[from] LoadError),

    /// The cyclic retry loop ran out of attempts with fixtures still pending.
    #[error(
        "exhausted {attempts} retry attempts; still pending: {}",
        join_tables(.pending)
    )]
    RetryExhausted {
        /// Exactly the tables that never loaded, in attempt order.
        pending: Vec<TableName>,
        /// The attempt bound that was exhausted.
        attempts: u32,
    },
}

impl EngineError {
    /// Creates a retry-exhausted error.
    pub fn retry_exhausted(pending: Vec<TableName>, attempts: u32) -> Self {
        Self::RetryExhausted { pending, attempts }
    }
}

fn join_tables(tables: &[TableName]) -> String {
    tables
        .iter()
        .map(TableName::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
