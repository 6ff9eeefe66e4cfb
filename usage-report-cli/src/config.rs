//! Configuration loading and parsing
//!
//! The batch driver runs with built-in defaults (`logs/` → `reports/`); a
//! TOML file can override them and command-line flags override both.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Batch driver configuration (loaded from config.toml)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Directory scanned for `*.csv` sources
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,

    /// Directory the artifacts are written into (created if absent)
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("reports")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
        }
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            input_dir = "collected-logs"
            output_dir = "out"
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.input_dir, PathBuf::from("collected-logs"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_defaults_apply_to_missing_keys() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.input_dir, PathBuf::from("logs"));
        assert_eq!(config.output_dir, PathBuf::from("reports"));
    }

    #[test]
    fn test_load_config_missing_file() {
        assert!(load_config(Path::new("/nonexistent/config.toml")).is_err());
    }
}
