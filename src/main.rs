//! netparams CLI entry point

use anyhow::{Context, Result};
use netparams::config::{cli::Cli, toml::load_settings, validator, RunConfig};
use netparams::dispatch::process::ProcessRunner;
use netparams::output::{json, text};
use netparams::pipeline;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    println!("netparams v{}", env!("CARGO_PKG_VERSION"));
    println!();

    // Parse CLI arguments
    let cli = Cli::parse_args();
    cli.validate()?;

    // Config file first, CLI flags on top
    let settings = load_settings(&cli)?;
    init_logging(settings.runtime.debug);

    validator::validate_settings(&settings)
        .context("Configuration validation failed")?;

    // Resolve jar, network and features once for all directories
    let config = RunConfig::resolve(&settings)?;

    println!();
    text::print_configuration(&config);

    let runner = ProcessRunner::new(config.runtime.capture_output);
    let report = pipeline::run(&cli.dirs, &config, &runner)?;

    if let Some(ref path) = settings.output.json_output {
        json::write_report(path, &config, &report)?;
        println!();
        println!("Report written to {}", path.display());
    }

    text::print_summary(&report);

    if !report.is_success() {
        anyhow::bail!(
            "{} of {} directories failed",
            report.failures.len(),
            report.failures.len() + report.selections.len()
        );
    }

    Ok(())
}

/// Initialize diagnostics on stderr; `RUST_LOG` takes precedence over `--debug`
fn init_logging(debug: bool) {
    let default_filter = if debug { "netparams=debug" } else { "netparams=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
