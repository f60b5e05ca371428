//! Configuration validation

use super::*;
use anyhow::Result;

/// Validate settings before any glob is resolved
///
/// The model is handed to the external tool verbatim and is not checked here.
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_pattern("jar", &settings.jar)?;
    validate_pattern("network", &settings.network)?;
    validate_pattern("features", &settings.features)?;

    if settings.java.trim().is_empty() {
        anyhow::bail!("java executable must not be empty");
    }

    validate_output(&settings.output)?;

    Ok(())
}

fn validate_pattern(name: &str, pattern: &str) -> Result<()> {
    if pattern.trim().is_empty() {
        anyhow::bail!("{} pattern must not be empty", name);
    }
    glob::Pattern::new(pattern)
        .map_err(|e| anyhow::anyhow!("Invalid {} pattern '{}': {}", name, pattern, e))?;
    Ok(())
}

fn validate_output(output: &OutputConfig) -> Result<()> {
    if let Some(ref path) = output.json_output {
        if path.is_dir() {
            anyhow::bail!("json_output must be a file, got directory {}", path.display());
        }
    }
    Ok(())
}
