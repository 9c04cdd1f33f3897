//! Command-line interface.
//!
//! `fixload --dir <root> --deps <rows.json> [--glob PATTERN] [--load-cmd CMD]`
//!
//! Dependency metadata comes from a JSON file of rows shaped like the
//! `information_schema.KEY_COLUMN_USAGE` projection
//! (`[{"table_name": ..., "reference_table_name": ...}, ...]`); querying a
//! live catalog and dumping it to such a file is left to the caller. Without
//! `--load-cmd` the run is a dry run: the computed plan is printed as JSON
//! and nothing is loaded.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::info;

use fixload_core::{DependencyGraph, DependencyRow};
use fixload_engine::{DEFAULT_MAX_ATTEMPTS, LoadEngine, topological_sort};

use crate::discover;
use crate::loader::CommandLoader;

#[derive(Debug, Parser)]
#[command(name = "fixload", about = "Load database fixtures in dependency order")]
pub struct Cli {
    /// Directory to scan for fixture files
    #[arg(long)]
    dir: PathBuf,

    /// Glob pattern selecting fixture files, relative to --dir
    #[arg(long, default_value = "*/fixtures/*.json")]
    glob: String,

    /// JSON file of foreign-key metadata rows
    #[arg(long)]
    deps: PathBuf,

    /// Maximum retry rounds for tables in a dependency cycle
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_retries: u32,

    /// Command to load fixture files with (paths are appended);
    /// omit for a dry run that only prints the plan
    #[arg(long)]
    load_cmd: Option<String>,

    /// Enable debug-level logging
    #[arg(long)]
    verbose: bool,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        init_tracing(self.verbose);

        let rows = read_dependency_rows(&self.deps)?;
        let graph = DependencyGraph::from_rows(rows);
        let fixtures = discover::discover(&self.dir, &self.glob)
            .with_context(|| format!("scanning {}", self.dir.display()))?;

        let plan = topological_sort(&graph);
        info!(
            target: "fixload::cli",
            tables = graph.len(),
            fixtures = fixtures.len(),
            ordered = plan.ordered.len(),
            cyclic = plan.cyclic.len(),
            "plan computed"
        );

        match self.load_cmd.as_deref() {
            Some(command_line) => {
                let loader = CommandLoader::new(command_line)
                    .context("--load-cmd must not be empty")?;
                let report = LoadEngine::new()
                    .with_max_attempts(self.max_retries)
                    .run(&plan, &fixtures, loader)?;
                info!(
                    target: "fixload::cli",
                    ordered = report.ordered.len(),
                    cyclic = report.cyclic.len(),
                    rounds = report.rounds,
                    "all fixtures loaded"
                );
            }
            None => {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            }
        }
        Ok(())
    }
}

fn read_dependency_rows(path: &Path) -> anyhow::Result<Vec<DependencyRow>> {
    let file =
        File::open(path).with_context(|| format!("opening dependency file {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing dependency rows from {}", path.display()))
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
