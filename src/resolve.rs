//! Glob resolution of auxiliary inputs

use crate::error::ResolveError;
use glob::MatchOptions;
use std::path::PathBuf;
use tracing::debug;

/// Match options shared by every glob in the crate
///
/// Hidden files and directories only match when the pattern spells out the
/// leading dot, so `*.jar` skips `.backup.jar` and `**` does not descend
/// into `.snapshot/`.
pub fn match_options() -> MatchOptions {
    MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    }
}

/// Resolve a glob pattern to its first match
///
/// Matches are enumerated in the order the `glob` crate yields them (sorted
/// per directory level). When several files match, the first one is used
/// without further disambiguation.
pub fn match_first(pattern: &str) -> Result<PathBuf, ResolveError> {
    let paths = glob::glob_with(pattern, match_options()).map_err(|source| ResolveError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut matches = paths.filter_map(|entry| match entry {
        Ok(path) => Some(path),
        Err(e) => {
            debug!("Skipping unreadable entry while matching {}: {}", pattern, e);
            None
        }
    });

    let first = matches.next().ok_or_else(|| ResolveError::NoMatch {
        pattern: pattern.to_string(),
    })?;

    let others = matches.count();
    if others > 0 {
        debug!("Pattern {} matched {} more file(s), using {}", pattern, others, first.display());
    }

    Ok(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_match_first_single() {
        let temp_dir = TempDir::new().unwrap();
        let jar = temp_dir.path().join("matsim.jar");
        fs::write(&jar, b"").unwrap();

        let pattern = temp_dir.path().join("*.jar");
        let resolved = match_first(&pattern.to_string_lossy()).unwrap();
        assert_eq!(resolved, jar);
    }

    #[test]
    fn test_match_first_picks_first_of_many() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b-network.xml.gz"), b"").unwrap();
        fs::write(temp_dir.path().join("a-network.xml.gz"), b"").unwrap();

        let pattern = temp_dir.path().join("*.xml.gz");
        let resolved = match_first(&pattern.to_string_lossy()).unwrap();
        assert_eq!(resolved, temp_dir.path().join("a-network.xml.gz"));
    }

    #[test]
    fn test_match_first_skips_hidden_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(".backup.jar"), b"").unwrap();
        fs::write(temp_dir.path().join("matsim.jar"), b"").unwrap();

        let pattern = temp_dir.path().join("*.jar");
        let resolved = match_first(&pattern.to_string_lossy()).unwrap();
        assert_eq!(resolved, temp_dir.path().join("matsim.jar"));

        let pattern = temp_dir.path().join(".*.jar");
        let resolved = match_first(&pattern.to_string_lossy()).unwrap();
        assert_eq!(resolved, temp_dir.path().join(".backup.jar"));
    }

    #[test]
    fn test_match_first_hidden_only() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(".network.xml.gz"), b"").unwrap();

        let pattern = temp_dir.path().join("*.xml.gz");
        let err = match_first(&pattern.to_string_lossy()).unwrap_err();
        assert!(matches!(err, ResolveError::NoMatch { .. }));
    }

    #[test]
    fn test_match_first_no_match() {
        let temp_dir = TempDir::new().unwrap();
        let pattern = temp_dir.path().join("*ft.csv.gz").to_string_lossy().into_owned();

        let err = match_first(&pattern).unwrap_err();
        assert!(matches!(err, ResolveError::NoMatch { .. }));
        assert_eq!(err.to_string(), format!("No file matching {} found", pattern));
    }

    #[test]
    fn test_match_first_invalid_pattern() {
        let err = match_first("[*.jar").unwrap_err();
        assert!(matches!(err, ResolveError::InvalidPattern { .. }));
    }
}
