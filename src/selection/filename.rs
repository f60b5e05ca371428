//! Result filename grammar
//!
//! Calibration iterations write their parameters to files named
//!
//! ```text
//! it<N>_mae_<float>_rmse_<float>.json
//! ```
//!
//! where `<float>` is one or more digits with an optional fractional part.
//! Only the `mae_<float>_rmse_<float>.json` suffix is significant here.

use crate::error::SelectError;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Error metrics encoded in a result filename
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub mae: f64,
    pub rmse: f64,
}

fn metrics_regex() -> &'static Regex {
    static METRICS_RE: OnceLock<Regex> = OnceLock::new();
    // Safety: this regex literal is guaranteed to compile
    METRICS_RE.get_or_init(|| {
        Regex::new(r"mae_(?P<mae>[0-9]+(?:\.[0-9]+)?)_rmse_(?P<rmse>[0-9]+(?:\.[0-9]+)?)\.json$").unwrap()
    })
}

/// Parse `mae` and `rmse` from the file name of `path`
pub fn parse_metrics(path: &Path) -> Result<Metrics, SelectError> {
    let malformed = || SelectError::MalformedFilename { path: path.to_path_buf() };

    let name = path.file_name().and_then(|n| n.to_str()).ok_or_else(malformed)?;
    let captures = metrics_regex().captures(name).ok_or_else(malformed)?;

    let mae = parse_field(path, "mae", &captures["mae"])?;
    let rmse = parse_field(path, "rmse", &captures["rmse"])?;

    Ok(Metrics { mae, rmse })
}

fn parse_field(path: &Path, field: &'static str, value: &str) -> Result<f64, SelectError> {
    value.parse().map_err(|source| SelectError::InvalidMetric {
        path: path.to_path_buf(),
        field,
        value: value.to_string(),
        source,
    })
}
