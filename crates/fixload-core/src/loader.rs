//! The loader capability contract.
//!
//! Whatever actually inserts records — an external management command, a
//! database session, an in-memory double in tests — implements [`Loader`].
//! The engine treats it as a black box: it may retry internally or not, the
//! engine's own cyclic retry wraps it regardless.

use crate::error::LoadResult;
use crate::fixture::Fixture;

/// Capability for loading fixture files into the destination store.
///
/// Two entry points mirror how the engine calls it:
///
/// - [`load_batch`](Loader::load_batch) for the acyclic portion of the plan,
///   whose internal ordering is already dependency-safe, loaded in one pass;
/// - [`load_one`](Loader::load_one) for members of the cyclic remainder,
///   which must be attempted individually so one failure cannot take its
///   round-siblings down with it.
pub trait Loader {
    /// Loads an ordered batch of fixtures in one invocation.
    ///
    /// All-or-nothing from the engine's point of view: an error fails the
    /// whole batch and is not retried.
    fn load_batch(&mut self, batch: &[Fixture]) -> LoadResult<()>;

    /// Loads a single fixture.
    ///
    /// The default forwards to [`load_batch`](Loader::load_batch) with a
    /// one-element slice; implementations with a cheaper single-unit path
    /// can override.
    fn load_one(&mut self, fixture: &Fixture) -> LoadResult<()> {
        self.load_batch(std::slice::from_ref(fixture))
    }
}

impl<L: Loader + ?Sized> Loader for &mut L {
    fn load_batch(&mut self, batch: &[Fixture]) -> LoadResult<()> {
        (**self).load_batch(batch)
    }

    fn load_one(&mut self, fixture: &Fixture) -> LoadResult<()> {
        (**self).load_one(fixture)
    }
}
