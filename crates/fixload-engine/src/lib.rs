//! Ordering and retry engine for Fixload.
//!
//! Given a [`DependencyGraph`](fixload_core::DependencyGraph), this crate
//! computes a [`LoadPlan`] with Kahn's algorithm — a fully ordered sequence
//! for the acyclic portion, plus the cyclic remainder that no topological
//! order can satisfy — and drives a [`Loader`](fixload_core::Loader) through
//! it: the ordered portion as one batch, the cyclic remainder through a
//! bounded retry loop that tolerates partial, out-of-order success.
//!
//! # Example
//!
//! ```
//! use fixload_core::{DependencyGraph, DependencyRow};
//! use fixload_engine::topological_sort;
//!
//! let graph = DependencyGraph::from_rows([
//!     DependencyRow::new("orders", "users"),
//!     DependencyRow::without_reference("users"),
//! ]);
//!
//! let plan = topological_sort(&graph);
//! assert_eq!(plan.ordered.len(), 2);
//! assert!(plan.cyclic.is_empty());
//! ```

pub mod engine;
pub mod error;
pub mod plan;
pub mod retry;

pub use engine::{DEFAULT_MAX_ATTEMPTS, LoadEngine, LoadReport};
pub use error::{EngineError, EngineResult};
pub use plan::{LoadPlan, topological_sort};
pub use retry::RetryState;
