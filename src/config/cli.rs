//! CLI argument parsing using clap

use clap::Parser;
use std::path::PathBuf;

/// netparams - Apply the best network calibration result
///
/// Scans each result directory for `it*_mae_<x>_rmse_<y>.json` parameter files,
/// picks the one with the lowest MAE (ties broken by RMSE) and runs
/// ApplyNetworkParams to write `network_<dir>.xml.gz` next to the directory.
#[derive(Parser, Debug)]
#[command(name = "netparams")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directories with result data
    #[arg(value_name = "DIRS", required = true)]
    pub dirs: Vec<PathBuf>,

    /// TOML configuration file (CLI options take precedence)
    #[arg(short = 'c', long, env = "NETPARAMS_CONFIG")]
    pub config: Option<PathBuf>,

    // === Input Options ===
    /// Pattern to the MATSim jar file [default: *.jar]
    #[arg(long, value_name = "PATTERN")]
    pub jar: Option<String>,

    /// Pattern to the network file [default: *.xml.gz]
    #[arg(long, value_name = "PATTERN")]
    pub network: Option<String>,

    /// Pattern to the network features file [default: *ft.csv.gz]
    #[arg(long, value_name = "PATTERN")]
    pub features: Option<String>,

    /// Network params model class
    /// [default: org.matsim.application.prepare.network.params.ref.GermanyNetworkParams]
    #[arg(long, value_name = "CLASS")]
    pub model: Option<String>,

    /// Java executable [default: java]
    #[arg(long, value_name = "PATH", env = "NETPARAMS_JAVA")]
    pub java: Option<String>,

    // === Runtime Options ===
    /// Select the best result and print the command without running it
    #[arg(long)]
    pub dry_run: bool,

    /// Fail when the external tool exits with a non-zero status
    #[arg(long)]
    pub strict: bool,

    /// Capture the external tool's output instead of streaming it
    #[arg(long)]
    pub capture_output: bool,

    /// Continue with the remaining directories when one fails
    #[arg(long)]
    pub continue_on_error: bool,

    // === Output Options ===
    /// Write a JSON report of all selections
    #[arg(long, value_name = "FILE")]
    pub json_output: Option<PathBuf>,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate CLI arguments
    pub fn validate(&self) -> anyhow::Result<()> {
        let patterns = [
            ("--jar", &self.jar),
            ("--network", &self.network),
            ("--features", &self.features),
        ];
        for (option, pattern) in patterns {
            if matches!(pattern, Some(p) if p.trim().is_empty()) {
                anyhow::bail!("{} pattern must not be empty", option);
            }
        }

        if let Some(ref path) = self.json_output {
            if path.is_dir() {
                anyhow::bail!("--json-output must be a file, got directory {}", path.display());
            }
        }

        Ok(())
    }
}
