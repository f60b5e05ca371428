//! Typed errors for resolution, selection and dispatch
//!
//! Library functions return these so callers (and tests) can tell failure
//! kinds apart. The binary wraps them in `anyhow` with context.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to resolve an auxiliary input (jar, network, features) from a glob
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("No file matching {pattern} found")]
    NoMatch { pattern: String },

    #[error("Invalid pattern {pattern}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// Failure while locating, parsing or selecting result files
#[derive(Debug, Error)]
pub enum SelectError {
    #[error("no matching result files in {}", .dir.display())]
    NoCandidates { dir: PathBuf },

    #[error("result file name does not match mae_<float>_rmse_<float>.json: {}", .path.display())]
    MalformedFilename { path: PathBuf },

    #[error("invalid {field} value '{value}' in {}", .path.display())]
    InvalidMetric {
        path: PathBuf,
        field: &'static str,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("cannot derive an output name from directory {}", .dir.display())]
    InvalidDirectory { dir: PathBuf },

    #[error("failed to resolve directory {}: {source}", .dir.display())]
    Canonicalize {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid search pattern for {}: {source}", .dir.display())]
    Pattern {
        dir: PathBuf,
        #[source]
        source: glob::PatternError,
    },

    #[error("failed to read directory entry: {0}")]
    Glob(#[from] glob::GlobError),
}

/// Failure of the external tool invocation
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {}", describe_code(.code))]
    NonZeroExit { program: String, code: Option<i32> },
}

fn describe_code(code: &Option<i32>) -> String {
    match *code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}
