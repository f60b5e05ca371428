//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.
//!
//! Configuration comes in two stages. [`Settings`] holds the glob patterns and
//! options as written by the user (defaults, then config file, then CLI flags).
//! [`RunConfig`] is the resolved form: every pattern turned into a concrete
//! path, once, before any result directory is processed.

pub mod cli;
pub mod toml;
pub mod validator;

use crate::output::text;
use crate::resolve::match_first;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Default glob for the MATSim jar
pub const DEFAULT_JAR_PATTERN: &str = "*.jar";

/// Default glob for the input network
pub const DEFAULT_NETWORK_PATTERN: &str = "*.xml.gz";

/// Default glob for the network features table
pub const DEFAULT_FEATURES_PATTERN: &str = "*ft.csv.gz";

/// Default network params model class
pub const DEFAULT_MODEL: &str = "org.matsim.application.prepare.network.params.ref.GermanyNetworkParams";

/// Default java executable
pub const DEFAULT_JAVA: &str = "java";

/// User-facing settings before glob resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Glob pattern for the jar file
    pub jar: String,
    /// Glob pattern for the network file
    pub network: String,
    /// Glob pattern for the features file
    pub features: String,
    /// Model class passed verbatim to the external tool
    pub model: String,
    /// Java executable
    pub java: String,
    pub runtime: RuntimeConfig,
    pub output: OutputConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            jar: DEFAULT_JAR_PATTERN.to_string(),
            network: DEFAULT_NETWORK_PATTERN.to_string(),
            features: DEFAULT_FEATURES_PATTERN.to_string(),
            model: DEFAULT_MODEL.to_string(),
            java: DEFAULT_JAVA.to_string(),
            runtime: RuntimeConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Runtime behavior
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Select and print the invocation without running it
    pub dry_run: bool,
    /// Treat a non-zero exit of the external tool as an error
    pub strict: bool,
    /// Capture the external tool's output instead of inheriting the terminal
    pub capture_output: bool,
    /// Skip failing directories instead of aborting the run
    pub continue_on_error: bool,
    /// Verbose diagnostics
    pub debug: bool,
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Write a JSON report of all selections to this path
    pub json_output: Option<PathBuf>,
}

/// Resolved run configuration, shared read-only across all directories
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub jar: PathBuf,
    pub network: PathBuf,
    pub features: PathBuf,
    pub model: String,
    pub java: String,
    pub runtime: RuntimeConfig,
}

impl RunConfig {
    /// Resolve the jar, network and features patterns to their first match
    ///
    /// Fails on the first pattern without a match, before any result
    /// directory is touched.
    pub fn resolve(settings: &Settings) -> crate::Result<Self> {
        let jar = resolve_input("--jar", &settings.jar)?;
        let network = resolve_input("--network", &settings.network)?;
        let features = resolve_input("--features", &settings.features)?;

        Ok(Self {
            jar,
            network,
            features,
            model: settings.model.clone(),
            java: settings.java.clone(),
            runtime: settings.runtime.clone(),
        })
    }
}

fn resolve_input(option: &str, pattern: &str) -> crate::Result<PathBuf> {
    let path = match_first(pattern)
        .with_context(|| format!("Failed to resolve {}", option))?;
    text::print_using(&path);
    Ok(path)
}

impl fmt::Display for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Jar:      {}", self.jar.display())?;
        writeln!(f, "  Network:  {}", self.network.display())?;
        writeln!(f, "  Features: {}", self.features.display())?;
        writeln!(f, "  Model:    {}", self.model)?;
        write!(f, "  Java:     {}", self.java)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn pattern(dir: &TempDir, glob: &str) -> String {
        dir.path().join(glob).to_string_lossy().into_owned()
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.jar, "*.jar");
        assert_eq!(settings.network, "*.xml.gz");
        assert_eq!(settings.features, "*ft.csv.gz");
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.java, "java");
        assert!(!settings.runtime.strict);
        assert!(settings.output.json_output.is_none());
    }

    #[test]
    fn test_resolve_all_inputs() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("matsim-2025.jar"), b"").unwrap();
        fs::write(temp_dir.path().join("berlin.xml.gz"), b"").unwrap();
        fs::write(temp_dir.path().join("berlin-ft.csv.gz"), b"").unwrap();

        let settings = Settings {
            jar: pattern(&temp_dir, "*.jar"),
            network: pattern(&temp_dir, "*.xml.gz"),
            features: pattern(&temp_dir, "*ft.csv.gz"),
            ..Settings::default()
        };

        let config = RunConfig::resolve(&settings).unwrap();
        assert_eq!(config.jar, temp_dir.path().join("matsim-2025.jar"));
        assert_eq!(config.network, temp_dir.path().join("berlin.xml.gz"));
        assert_eq!(config.features, temp_dir.path().join("berlin-ft.csv.gz"));
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_resolve_uses_directory_match() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("matsim.jar"), b"").unwrap();
        fs::write(temp_dir.path().join("berlin.xml.gz"), b"").unwrap();
        fs::create_dir(temp_dir.path().join("berlin-ft.csv.gz")).unwrap();

        let settings = Settings {
            jar: pattern(&temp_dir, "*.jar"),
            network: pattern(&temp_dir, "*.xml.gz"),
            features: pattern(&temp_dir, "*ft.csv.gz"),
            ..Settings::default()
        };

        let config = RunConfig::resolve(&settings).unwrap();
        assert_eq!(config.features, temp_dir.path().join("berlin-ft.csv.gz"));
        assert!(config.features.is_dir());
    }

    #[test]
    fn test_resolve_fails_on_missing_jar() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("berlin.xml.gz"), b"").unwrap();

        let jar = pattern(&temp_dir, "*.jar");
        let settings = Settings {
            jar: jar.clone(),
            network: pattern(&temp_dir, "*.xml.gz"),
            features: pattern(&temp_dir, "*ft.csv.gz"),
            ..Settings::default()
        };

        let err = RunConfig::resolve(&settings).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains(&format!("No file matching {} found", jar)));
        assert!(message.contains("--jar"));
    }
}
