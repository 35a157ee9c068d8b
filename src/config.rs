//! Configuration for the content model
//!
//! Stored as TOML, e.g.:
//!
//! ```toml
//! url_root = "/xblock"
//! strict_fields = false
//! max_depth = 64
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Root under which each node's read/update endpoint lives
    pub url_root: String,

    /// Reject unknown payload keys instead of dropping them
    pub strict_fields: bool,

    /// Maximum nesting of child/ancestor payloads below the root
    pub max_depth: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            url_root: "/xblock".to_string(),
            strict_fields: false,
            max_depth: 64,
        }
    }
}

impl ModelConfig {
    /// Loads configuration from a TOML file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read model config: {}", path.display()))?;

        Self::from_toml(&content).context("Failed to parse model config")
    }

    /// Parses configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration as TOML
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize model config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write model config: {}", path.display()))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.url_root.is_empty() {
            return Err(ConfigError::Invalid("url_root must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = ModelConfig::default();
        assert_eq!(config.url_root, "/xblock");
        assert!(!config.strict_fields);
        assert_eq!(config.max_depth, 64);
    }

    #[test]
    fn parse_partial_config() {
        let config = ModelConfig::from_toml("strict_fields = true\n").unwrap();
        assert!(config.strict_fields);
        assert_eq!(config.url_root, "/xblock");
    }

    #[test]
    fn reject_empty_url_root() {
        let err = ModelConfig::from_toml("url_root = \"\"\n").unwrap_err();
        assert!(err.to_string().contains("url_root"));
    }

    #[test]
    fn reject_malformed_toml() {
        let err = ModelConfig::from_toml("max_depth = \"deep\"").unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse configuration"));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ModelConfig::load(&dir.path().join("model.toml")).unwrap();
        assert_eq!(config, ModelConfig::default());
    }

    #[test]
    fn save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.toml");
        let config = ModelConfig {
            url_root: "/api/blocks".to_string(),
            strict_fields: true,
            max_depth: 8,
        };

        config.save(&path).unwrap();
        assert_eq!(ModelConfig::load(&path).unwrap(), config);
    }
}
