//! Fixture file discovery.
//!
//! Walks the source directory and matches each file's path, relative to the
//! root and with `/` separators, against a glob-style pattern compiled to an
//! anchored regex:
//!
//! - `*` matches within one path segment,
//! - `**` matches across segments,
//! - `?` matches one character within a segment.
//!
//! Matches are restricted to `.json` files, sorted lexicographically, and
//! mapped to tables by file stem — so with the default `*/fixtures/*.json`
//! pattern, `app/fixtures/users.json` loads the `users` table. When two apps
//! ship a fixture for the same table, the lexicographically first path wins.

use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use fixload_core::FixtureSet;

/// Result type for discovery.
pub type DiscoverResult<T> = Result<T, DiscoverError>;

/// Errors raised while scanning for fixture files.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DiscoverError {
    /// The glob pattern did not compile.
    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        /// The offending pattern.
        pattern: String,
        /// The underlying regex error.
        source: regex::Error,
    },

    /// A directory could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// The directory that failed.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}

/// Scans `dir` for fixture files matching `pattern`.
pub fn discover(dir: &Path, pattern: &str) -> DiscoverResult<FixtureSet> {
    let matcher = glob_to_regex(pattern)?;
    let mut paths = Vec::new();
    walk(dir, dir, &matcher, &mut paths)?;
    paths.retain(|p| p.extension().is_some_and(|ext| ext == "json"));
    paths.sort();
    paths.dedup();
    debug!(target: "fixload::discover", count = paths.len(), "fixture files found");
    Ok(FixtureSet::from_paths(paths))
}

/// Compiles a glob-style pattern into an anchored regex.
pub fn glob_to_regex(pattern: &str) -> DiscoverResult<Regex> {
    let mut expr = String::with_capacity(pattern.len() + 8);
    expr.push('^');
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => {
                if chars.peek() == Some(&'*') {
                    chars.next();
                    expr.push_str(".*");
                } else {
                    expr.push_str("[^/]*");
                }
            }
            '?' => expr.push_str("[^/]"),
            c => {
                if regex_syntax_char(c) {
                    expr.push('\\');
                }
                expr.push(c);
            }
        }
    }
    expr.push('$');
    Regex::new(&expr).map_err(|source| DiscoverError::Pattern {
        pattern: pattern.to_string(),
        source,
    })
}

fn regex_syntax_char(c: char) -> bool {
    matches!(
        c,
        '.' | '+' | '(' | ')' | '[' | ']' | '{' | '}' | '^' | '$' | '|' | '\\'
    )
}

fn walk(root: &Path, dir: &Path, matcher: &Regex, out: &mut Vec<PathBuf>) -> DiscoverResult<()> {
    let entries = fs::read_dir(dir).map_err(|source| DiscoverError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| DiscoverError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            walk(root, &path, matcher, out)?;
        } else if matcher.is_match(&relative_key(root, &path)) {
            out.push(path);
        }
    }
    Ok(())
}

/// Path relative to the scan root, `/`-separated regardless of platform.
fn relative_key(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
