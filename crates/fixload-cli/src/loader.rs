//! Process-spawning loader.
//!
//! The actual record insertion lives outside this tool — typically a
//! framework's own fixture command (e.g. `manage.py loaddata`). This loader
//! appends fixture paths to a configured command line and maps the child's
//! exit status onto the [`Loader`] contract.

use std::process::Command;
use tracing::debug;

use fixload_core::error::LoadResult;
use fixload_core::{Fixture, LoadError, Loader};

/// Loads fixtures by invoking an external command with their file paths.
///
/// The command string is split on whitespace: the first token is the program,
/// the rest are leading arguments. Each loader invocation spawns one child
/// process; a non-zero exit status is a load failure.
#[derive(Debug, Clone)]
pub struct CommandLoader {
    program: String,
    args: Vec<String>,
}

impl CommandLoader {
    /// Creates a loader from a command line such as
    /// `"python manage.py loaddata"`.
    ///
    /// Returns `None` for an empty or all-whitespace command line.
    #[must_use]
    pub fn new(command_line: &str) -> Option<Self> {
        let mut tokens = command_line.split_whitespace().map(str::to_string);
        let program = tokens.next()?;
        Some(Self {
            program,
            args: tokens.collect(),
        })
    }
}

impl Loader for CommandLoader {
    fn load_batch(&mut self, batch: &[Fixture]) -> LoadResult<()> {
        if batch.is_empty() {
            return Ok(());
        }
        let unit = match batch {
            [single] => single.table.to_string(),
            _ => format!("batch of {}", batch.len()),
        };
        debug!(target: "fixload::loader", program = %self.program, %unit, "spawning loader");

        let status = Command::new(&self.program)
            .args(&self.args)
            .args(batch.iter().map(|f| f.path.as_os_str()))
            .status()
            .map_err(|err| LoadError::new(unit.clone(), err.to_string()))?;

        if status.success() {
            Ok(())
        } else {
            Err(LoadError::new(
                unit,
                format!("{} exited with {status}", self.program),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_command_line_splits_into_program_and_args() {
        let loader = CommandLoader::new("python manage.py loaddata").unwrap();
        assert_eq!(loader.program, "python");
        assert_eq!(loader.args, vec!["manage.py", "loaddata"]);
    }

    #[test]
    fn test_empty_command_line_is_rejected() {
        assert!(CommandLoader::new("").is_none());
        assert!(CommandLoader::new("   ").is_none());
    }

    #[test]
    fn test_empty_batch_spawns_nothing() {
        let mut loader = CommandLoader::new("definitely-not-a-real-program").unwrap();
        assert!(loader.load_batch(&[]).is_ok());
    }

    #[test]
    fn test_missing_program_is_a_load_error() {
        let mut loader = CommandLoader::new("fixload-test-no-such-binary").unwrap();
        let fixture = Fixture::new("users", PathBuf::from("users.json"));
        let err = loader.load_one(&fixture).unwrap_err();
        assert_eq!(err.unit, "users");
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_maps_to_result() {
        let mut ok = CommandLoader::new("true").unwrap();
        let mut fail = CommandLoader::new("false").unwrap();
        let fixture = Fixture::new("users", PathBuf::from("users.json"));
        assert!(ok.load_one(&fixture).is_ok());
        let err = fail.load_one(&fixture).unwrap_err();
        assert!(err.reason.contains("exited with"));
    }
}
