//! JSON run report
//!
//! Records which parameter file was applied for every processed directory,
//! together with the resolved inputs, so a calibration campaign can be traced
//! back later.

use crate::config::RunConfig;
use crate::pipeline::{Failure, RunReport, Selection};
use crate::Result;
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Top-level JSON document
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub jar: &'a Path,
    pub network: &'a Path,
    pub features: &'a Path,
    pub model: &'a str,
    pub selections: &'a [Selection],
    pub failures: &'a [Failure],
}

impl<'a> JsonReport<'a> {
    pub fn new(config: &'a RunConfig, report: &'a RunReport) -> Self {
        Self {
            generated_at: Utc::now(),
            jar: &config.jar,
            network: &config.network,
            features: &config.features,
            model: &config.model,
            selections: &report.selections,
            failures: &report.failures,
        }
    }
}

/// Write the run report as pretty-printed JSON
pub fn write_report(path: &Path, config: &RunConfig, report: &RunReport) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create JSON output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, &JsonReport::new(config, report))
        .context("Failed to serialize run report")?;
    writeln!(writer)?;
    writer.flush()
        .with_context(|| format!("Failed to write JSON output file: {}", path.display()))?;

    Ok(())
}
