//! Human-readable text output

use crate::config::RunConfig;
use crate::dispatch::Invocation;
use crate::pipeline::RunReport;
use crate::selection::ResultRecord;
use std::path::Path;

/// Print which file a pattern resolved to
pub fn print_using(path: &Path) {
    println!("Using {}", path.display());
}

/// Print the resolved run configuration
pub fn print_configuration(config: &RunConfig) {
    println!("Configuration:");
    println!("{}", config);
    if config.runtime.dry_run {
        println!("  Mode:     dry run");
    }
    if config.runtime.strict {
        println!("  Strict:   non-zero exit fails the run");
    }
}

pub fn print_processing(dir: &Path) {
    println!();
    println!("Processing {}", dir.display());
}

/// Print the selected result
pub fn print_best(best: &ResultRecord, candidates: usize) {
    println!("Best result: {} (of {} candidates)", format_record(best), candidates);
}

pub fn print_applying(output: &Path) {
    println!("Applying network params to {}", output.display());
}

pub fn print_dry_run(invocation: &Invocation) {
    println!("Dry run, not executing: {}", invocation);
}

/// Print the end-of-run summary
pub fn print_summary(report: &RunReport) {
    println!();
    println!("═══════════════════════════════════════════════════════════");
    print!("{}", format_summary(report));
    println!("═══════════════════════════════════════════════════════════");
}

/// Format a record the way progress lines show it
pub fn format_record(record: &ResultRecord) -> String {
    format!("{}, mae: {}, rmse: {}", record.path.display(), record.mae, record.rmse)
}

/// Format the summary block, one line per directory
pub fn format_summary(report: &RunReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Processed {} director{}, {} failed\n",
        report.selections.len() + report.failures.len(),
        if report.selections.len() + report.failures.len() == 1 { "y" } else { "ies" },
        report.failures.len()
    ));

    for selection in &report.selections {
        let status = match (selection.dry_run, selection.exit_code) {
            (true, _) => "dry run".to_string(),
            (false, Some(0)) => "ok".to_string(),
            (false, Some(code)) => format!("exit {}", code),
            (false, None) => "killed".to_string(),
        };
        out.push_str(&format!(
            "  {} -> {} [{}]\n",
            selection.dir.display(),
            selection.output.display(),
            status
        ));
    }

    for failure in &report.failures {
        out.push_str(&format!("  {} FAILED: {}\n", failure.dir.display(), failure.error));
    }

    out
}
