//! Project configuration (odeur.toml)
//!
//! Threshold overrides for the analyzer. Absent file means defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file name looked up next to the analyzed source
pub const CONFIG_FILE: &str = "odeur.toml";

/// Analyzer thresholds.
///
/// Values are accepted as-is with no range validation: a nonsensical
/// threshold (say, 0) simply makes the corresponding rule fire on
/// everything. The class method-count threshold is fixed and not exposed
/// here (see `analyzer::MAX_CLASS_METHODS`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Statements allowed in a function body before it is flagged as long
    pub max_function_length: usize,
    /// Declared parameters allowed before a function is flagged
    pub max_parameters: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_function_length: 20,
            max_parameters: 5,
        }
    }
}

/// Load `odeur.toml` from `dir`, falling back to defaults when absent.
pub fn load_config(dir: &Path) -> Result<AnalyzerConfig> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(AnalyzerConfig::default());
    }

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config = toml::from_str(&raw)
        .with_context(|| format!("invalid config in {}", path.display()))?;

    tracing::debug!("loaded thresholds from {}", path.display());
    Ok(config)
}

/// Write a config file with the default thresholds, for `odeur init`.
pub fn write_default(dir: &Path) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILE);
    let body = toml::to_string_pretty(&AnalyzerConfig::default())
        .context("failed to serialize default config")?;
    std::fs::write(&path, body)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.max_function_length, 20);
        assert_eq!(config.max_parameters, 5);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config, AnalyzerConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "max_parameters = 3\n").unwrap();

        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.max_parameters, 3);
        assert_eq!(config.max_function_length, 20);
    }

    #[test]
    fn test_init_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = write_default(dir.path()).unwrap();
        assert!(path.exists());

        let config = load_config(dir.path()).unwrap();
        assert_eq!(config, AnalyzerConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "max_parameters = [oops").unwrap();
        assert!(load_config(dir.path()).is_err());
    }
}
