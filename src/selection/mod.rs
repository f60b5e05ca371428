//! Result file discovery and best-result selection
//!
//! A result directory holds one parameter file per calibration iteration,
//! possibly nested at any depth. Selection enumerates those files, reads the
//! error metrics from their names and keeps the one with the lowest MAE,
//! breaking ties on RMSE.

pub mod filename;

use crate::error::SelectError;
use crate::resolve::match_options;
use serde::Serialize;
use std::cmp::Ordering;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

pub use filename::{parse_metrics, Metrics};

/// File name pattern of calibration result files
pub const RESULT_FILE_PATTERN: &str = "it*.json";

/// A candidate parameter file with its error metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    pub path: PathBuf,
    pub mae: f64,
    pub rmse: f64,
}

impl ResultRecord {
    /// Build a record by parsing the metrics from the path's file name
    pub fn from_path(path: PathBuf) -> Result<Self, SelectError> {
        let Metrics { mae, rmse } = parse_metrics(&path)?;
        Ok(Self { path, mae, rmse })
    }

    /// Order by MAE, then RMSE
    pub fn cmp_metrics(&self, other: &Self) -> Ordering {
        self.mae
            .total_cmp(&other.mae)
            .then_with(|| self.rmse.total_cmp(&other.rmse))
    }
}

/// Recursively find all `it*.json` files below `dir`
///
/// Files directly inside `dir` are included; hidden files and hidden
/// subdirectories are not. The directory part of the search pattern is
/// escaped, so glob metacharacters in `dir` match literally.
pub fn locate_candidates(dir: &Path) -> Result<Vec<PathBuf>, SelectError> {
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let pattern = Path::new(&escaped).join("**").join(RESULT_FILE_PATTERN);

    let paths = glob::glob_with(&pattern.to_string_lossy(), match_options()).map_err(|source| SelectError::Pattern {
        dir: dir.to_path_buf(),
        source,
    })?;

    let mut candidates = Vec::new();
    for entry in paths {
        let path = entry?;
        if path.is_file() {
            candidates.push(path);
        }
    }

    debug!("Found {} candidate(s) in {}", candidates.len(), dir.display());
    Ok(candidates)
}

/// Parse every candidate path into a record
///
/// The first filename that does not follow the metric grammar fails the whole
/// directory.
pub fn parse_candidates(paths: Vec<PathBuf>) -> Result<Vec<ResultRecord>, SelectError> {
    paths.into_iter().map(ResultRecord::from_path).collect()
}

/// Rank records ascending by (MAE, RMSE)
///
/// The sort is stable: records with identical metrics keep their input order.
pub fn rank(mut records: Vec<ResultRecord>) -> Vec<ResultRecord> {
    records.sort_by(ResultRecord::cmp_metrics);
    records
}

/// Select the record with the lowest MAE, ties broken by the lowest RMSE
pub fn select_best(records: Vec<ResultRecord>, dir: &Path) -> Result<ResultRecord, SelectError> {
    rank(records)
        .into_iter()
        .next()
        .ok_or_else(|| SelectError::NoCandidates { dir: dir.to_path_buf() })
}

/// Output network path for a result directory
///
/// The network is written next to the directory as `network_<name>.xml.gz`.
pub fn output_path(dir: &Path) -> Result<PathBuf, SelectError> {
    let dir = match dir.file_name() {
        Some(_) => dir.to_path_buf(),
        None => dir.canonicalize().map_err(|source| SelectError::Canonicalize {
            dir: dir.to_path_buf(),
            source,
        })?,
    };

    let name = dir
        .file_name()
        .ok_or_else(|| SelectError::InvalidDirectory { dir: dir.clone() })?;

    let mut file_name = OsString::from("network_");
    file_name.push(name);
    file_name.push(".xml.gz");

    let parent = dir.parent().unwrap_or_else(|| Path::new(""));
    Ok(parent.join(file_name))
}
