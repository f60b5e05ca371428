//! Per-directory processing
//!
//! Each result directory goes through the same linear steps: enumerate
//! candidates, parse their metrics, select the best, derive the output path,
//! dispatch the external tool. Directories are processed one after another
//! in the order given.

use crate::config::RunConfig;
use crate::dispatch::{check_outcome, freespeed_invocation, CommandRunner};
use crate::output::text;
use crate::selection::{locate_candidates, output_path, parse_candidates, select_best, ResultRecord};
use crate::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Outcome of processing one result directory
#[derive(Debug, Clone, Serialize)]
pub struct Selection {
    pub dir: PathBuf,
    pub best: ResultRecord,
    /// Number of result files considered
    pub candidates: usize,
    pub output: PathBuf,
    /// Exit code of the external tool, `None` for dry runs or signals
    pub exit_code: Option<i32>,
    pub dry_run: bool,
}

/// A directory skipped because of an error (only with continue-on-error)
#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    pub dir: PathBuf,
    pub error: String,
}

/// Everything a run produced
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub selections: Vec<Selection>,
    pub failures: Vec<Failure>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Select the best result in `dir` and apply it
pub fn process_directory(dir: &Path, config: &RunConfig, runner: &dyn CommandRunner) -> Result<Selection> {
    text::print_processing(dir);

    let paths = locate_candidates(dir)?;
    let candidates = paths.len();
    let records = parse_candidates(paths)?;
    let best = select_best(records, dir)?;
    text::print_best(&best, candidates);

    let output = output_path(dir)?;
    let invocation = freespeed_invocation(config, &best.path, &output);

    if config.runtime.dry_run {
        text::print_dry_run(&invocation);
        return Ok(Selection {
            dir: dir.to_path_buf(),
            best,
            candidates,
            output,
            exit_code: None,
            dry_run: true,
        });
    }

    text::print_applying(&output);
    let outcome = runner.run(&invocation)?;
    check_outcome(&invocation, &outcome, config.runtime.strict)?;

    Ok(Selection {
        dir: dir.to_path_buf(),
        best,
        candidates,
        output,
        exit_code: outcome.code,
        dry_run: false,
    })
}

/// Process all directories in order
///
/// The first failing directory aborts the run unless `continue_on_error` is
/// set, in which case the failure is recorded and the next directory is
/// processed.
pub fn run<P: AsRef<Path>>(dirs: &[P], config: &RunConfig, runner: &dyn CommandRunner) -> Result<RunReport> {
    let mut report = RunReport::default();

    for dir in dirs {
        let dir = dir.as_ref();
        match process_directory(dir, config, runner) {
            Ok(selection) => {
                debug!("Selected {} for {}", selection.best.path.display(), dir.display());
                report.selections.push(selection);
            }
            Err(e) if config.runtime.continue_on_error => {
                error!("Failed to process {}: {:#}", dir.display(), e);
                report.failures.push(Failure {
                    dir: dir.to_path_buf(),
                    error: format!("{:#}", e),
                });
            }
            Err(e) => {
                return Err(e.context(format!("Failed to process {}", dir.display())));
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuntimeConfig;
    use crate::dispatch::recording::RecordingRunner;
    use crate::error::{DispatchError, SelectError};
    use std::fs;
    use tempfile::TempDir;

    fn config(runtime: RuntimeConfig) -> RunConfig {
        RunConfig {
            jar: PathBuf::from("matsim.jar"),
            network: PathBuf::from("network.xml.gz"),
            features: PathBuf::from("network-ft.csv.gz"),
            model: "org.example.Params".to_string(),
            java: "java".to_string(),
            runtime,
        }
    }

    fn result_dir(root: &Path, name: &str, files: &[&str]) -> PathBuf {
        let dir = root.join(name);
        for file in files {
            let path = dir.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, b"{}").unwrap();
        }
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_process_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dir = result_dir(
            temp_dir.path(),
            "run_A",
            &["output/it1_mae_0.50_rmse_1.00.json", "output/it2_mae_0.30_rmse_2.00.json"],
        );
        let runner = RecordingRunner::new();

        let selection = process_directory(&dir, &config(RuntimeConfig::default()), &runner).unwrap();

        assert_eq!(selection.best.path, dir.join("output/it2_mae_0.30_rmse_2.00.json"));
        assert_eq!(selection.candidates, 2);
        assert_eq!(selection.output, temp_dir.path().join("network_run_A.xml.gz"));
        assert_eq!(selection.exit_code, Some(0));

        let invocations = runner.invocations();
        assert_eq!(invocations.len(), 1);
        let args = invocations[0].args_lossy();
        assert!(args.contains(&dir.join("output/it2_mae_0.30_rmse_2.00.json").to_string_lossy().into_owned()));
        assert_eq!(args.last().unwrap(), &selection.output.to_string_lossy());
    }

    #[test]
    fn test_no_candidates() {
        let temp_dir = TempDir::new().unwrap();
        let dir = result_dir(temp_dir.path(), "empty", &["config.json"]);
        let runner = RecordingRunner::new();

        let err = process_directory(&dir, &config(RuntimeConfig::default()), &runner).unwrap_err();
        assert!(matches!(err.downcast_ref::<SelectError>(), Some(SelectError::NoCandidates { .. })));
        assert!(runner.invocations().is_empty());
    }

    #[test]
    fn test_dry_run_does_not_dispatch() {
        let temp_dir = TempDir::new().unwrap();
        let dir = result_dir(temp_dir.path(), "run_A", &["it1_mae_0.1_rmse_0.1.json"]);
        let runner = RecordingRunner::new();
        let runtime = RuntimeConfig { dry_run: true, ..RuntimeConfig::default() };

        let selection = process_directory(&dir, &config(runtime), &runner).unwrap();
        assert!(selection.dry_run);
        assert_eq!(selection.exit_code, None);
        assert!(runner.invocations().is_empty());
    }

    #[test]
    fn test_non_zero_exit_ignored_by_default() {
        let temp_dir = TempDir::new().unwrap();
        let dir = result_dir(temp_dir.path(), "run_A", &["it1_mae_0.1_rmse_0.1.json"]);
        let runner = RecordingRunner::with_exit_code(1);

        let selection = process_directory(&dir, &config(RuntimeConfig::default()), &runner).unwrap();
        assert_eq!(selection.exit_code, Some(1));
    }

    #[test]
    fn test_non_zero_exit_fails_when_strict() {
        let temp_dir = TempDir::new().unwrap();
        let dir = result_dir(temp_dir.path(), "run_A", &["it1_mae_0.1_rmse_0.1.json"]);
        let runner = RecordingRunner::with_exit_code(1);
        let runtime = RuntimeConfig { strict: true, ..RuntimeConfig::default() };

        let err = process_directory(&dir, &config(runtime), &runner).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DispatchError>(),
            Some(DispatchError::NonZeroExit { code: Some(1), .. })
        ));
    }

    #[test]
    fn test_run_aborts_on_first_failure() {
        let temp_dir = TempDir::new().unwrap();
        let good = result_dir(temp_dir.path(), "run_A", &["it1_mae_0.1_rmse_0.1.json"]);
        let bad = result_dir(temp_dir.path(), "run_B", &[]);
        let later = result_dir(temp_dir.path(), "run_C", &["it1_mae_0.2_rmse_0.1.json"]);
        let runner = RecordingRunner::new();

        let err = run(&[good, bad, later], &config(RuntimeConfig::default()), &runner).unwrap_err();
        assert!(err.to_string().contains("run_B"));
        assert!(matches!(err.downcast_ref::<SelectError>(), Some(SelectError::NoCandidates { .. })));
        assert_eq!(runner.invocations().len(), 1);
    }

    #[test]
    fn test_run_continue_on_error() {
        let temp_dir = TempDir::new().unwrap();
        let good = result_dir(temp_dir.path(), "run_A", &["it1_mae_0.1_rmse_0.1.json"]);
        let malformed = result_dir(temp_dir.path(), "run_B", &["it1_final.json"]);
        let later = result_dir(temp_dir.path(), "run_C", &["it1_mae_0.2_rmse_0.1.json"]);
        let runner = RecordingRunner::new();
        let runtime = RuntimeConfig { continue_on_error: true, ..RuntimeConfig::default() };

        let report = run(&[good, malformed.clone(), later], &config(runtime), &runner).unwrap();

        assert_eq!(report.selections.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].dir, malformed);
        assert!(report.failures[0].error.contains("it1_final.json"));
        assert!(!report.is_success());
        assert_eq!(runner.invocations().len(), 2);
    }
}
