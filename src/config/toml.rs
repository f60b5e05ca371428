//! TOML configuration file parsing

use super::*;
use crate::config::cli::Cli;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Settings> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Settings> {
    let settings: Settings = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(settings)
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut settings: Settings) -> Settings {
    // Override input patterns
    if let Some(ref jar) = cli.jar {
        settings.jar = jar.clone();
    }
    if let Some(ref network) = cli.network {
        settings.network = network.clone();
    }
    if let Some(ref features) = cli.features {
        settings.features = features.clone();
    }
    if let Some(ref model) = cli.model {
        settings.model = model.clone();
    }
    if let Some(ref java) = cli.java {
        settings.java = java.clone();
    }

    // Flags can only switch behavior on
    if cli.dry_run {
        settings.runtime.dry_run = true;
    }
    if cli.strict {
        settings.runtime.strict = true;
    }
    if cli.capture_output {
        settings.runtime.capture_output = true;
    }
    if cli.continue_on_error {
        settings.runtime.continue_on_error = true;
    }
    if cli.debug {
        settings.runtime.debug = true;
    }

    if let Some(ref path) = cli.json_output {
        settings.output.json_output = Some(path.clone());
    }

    settings
}

/// Build settings from defaults, the optional config file and the CLI
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let base = match cli.config {
        Some(ref path) => parse_toml_file(path)?,
        None => Settings::default(),
    };

    Ok(merge_cli_with_config(cli, base))
}
