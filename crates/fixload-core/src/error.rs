//! Error types for loader invocations.
//!
//! Per-unit load failure is data, not control flow: the loader returns an
//! explicit `Result` and the engine's retry loop partitions a round on it.
//! Nothing here panics or carries panic payloads.

use thiserror::Error;

/// Result type for loader invocations.
pub type LoadResult<T> = Result<T, LoadError>;

/// A loader invocation failed.
///
/// `unit` names what was being loaded — a single table for per-unit calls,
/// or a summary like `"batch of 12"` for batched calls. Inside a cyclic
/// retry round this error is transient and consumed by the engine; for the
/// ordered batch it is fatal and propagates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to load {unit}: {reason}")]
pub struct LoadError {
    /// What was being loaded.
    pub unit: String,
    /// Why the loader refused or failed.
    pub reason: String,
}

impl LoadError {
    /// Creates a load error.
    pub fn new(unit: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            reason: reason.into(),
        }
    }
}
