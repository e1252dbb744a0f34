//! Configuration system for Covenant.
//!
//! Load enforcement configuration from TOML or YAML files to control the
//! process-wide toggle and catalog installation without code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use covenant_config::EnforcementConfig;
//!
//! let config = EnforcementConfig::from_toml_str(r#"
//!     [enforcement]
//!     enabled = false
//!
//!     [catalog]
//!     defaults = true
//! "#).unwrap();
//!
//! assert!(!config.enforcement.enabled);
//! assert!(config.catalog.defaults);
//! ```
//!
//! Use default config when the file is missing:
//!
//! ```
//! use covenant_config::EnforcementConfig;
//!
//! let config = EnforcementConfig::load("covenant.toml").unwrap_or_default();
//! // Proceeds with defaults (everything on) if the file doesn't exist
//! assert!(config.enforcement.enabled);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main enforcement configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EnforcementConfig {
    /// Process-wide enforcement toggle.
    #[serde(default)]
    pub enforcement: EnforcementSection,

    /// Baseline predicate catalog installation.
    #[serde(default)]
    pub catalog: CatalogSection,
}

/// `[enforcement]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EnforcementSection {
    /// Whether wrapped callables check their contracts. Default: on.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// `[catalog]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CatalogSection {
    /// Whether the baseline predicate catalog is installed at boot.
    /// Default: on.
    #[serde(default = "default_true")]
    pub defaults: bool,
}

fn default_true() -> bool {
    true
}

impl Default for EnforcementSection {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self { defaults: true }
    }
}

impl EnforcementConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }
}
