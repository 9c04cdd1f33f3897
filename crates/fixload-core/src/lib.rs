//! Core types and collaborator traits for Fixload.
//!
//! `fixload-core` is the **foundation layer** for the workspace. It defines the
//! data model and the collaborator contracts that the engine and CLI build on.
//!
//! # Role In The Architecture
//!
//! - **Data model**: [`TableName`], [`DependencyRow`], [`DependencyGraph`], and
//!   [`FixtureSet`] represent the inputs to dependency-ordered loading.
//! - **Contract layer**: [`Loader`] is the trait implemented by whatever
//!   mechanism actually inserts records (an external command, a database
//!   session, a test double). The core never performs I/O itself.
//!
//! # Who Uses This Crate
//!
//! - `fixload-engine` consumes [`DependencyGraph`] to compute a load plan and
//!   drives [`Loader`] through it.
//! - `fixload-cli` builds [`DependencyGraph`] from schema metadata rows,
//!   discovers a [`FixtureSet`] on disk, and supplies a process-spawning
//!   [`Loader`].

pub mod error;
pub mod fixture;
pub mod graph;
pub mod loader;
pub mod table;

pub use error::LoadError;
pub use fixture::{Fixture, FixtureSet};
pub use graph::{DependencyGraph, DependencyRow};
pub use loader::Loader;
pub use table::TableName;
