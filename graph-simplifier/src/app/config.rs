//! Configuration Management

use crate::store::DEFAULT_NAMESPACE;
use crate::tolerance::ToleranceConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Simplification settings
    pub simplification: SimplificationConfig,
    /// Epsilon estimation settings
    pub tolerance: ToleranceConfig,
    /// Preference store location
    #[serde(default)]
    pub store: StoreConfig,
}

/// Simplification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplificationConfig {
    /// Epsilon used when nothing else resolves one
    pub default_epsilon: f64,
}

/// Preference store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Namespace (file stem) of the settings table
    pub namespace: String,
    /// Directory override; defaults to the settings directory in $HOME
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl Default for SimplificationConfig {
    fn default() -> Self {
        Self {
            default_epsilon: crate::analysis::rdp_simplification::DEFAULT_EPSILON,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            directory: None,
        }
    }
}

impl StoreConfig {
    /// Open the configured file store
    pub fn open(&self) -> Result<crate::store::FileStore, crate::Error> {
        let directory = self
            .directory
            .clone()
            .unwrap_or_else(crate::store::FileStore::default_directory);
        crate::store::FileStore::with_namespace(&directory, &self.namespace)
    }
}

impl Config {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if !(self.simplification.default_epsilon >= 0.0) {
            return Err(crate::Error::Config(format!(
                "default_epsilon must be >= 0, got {}", self.simplification.default_epsilon
            )));
        }
        if !(self.tolerance.auto_ratio > 0.0 && self.tolerance.auto_ratio <= 1.0) {
            return Err(crate::Error::Config(format!(
                "auto_ratio must be in (0, 1], got {}", self.tolerance.auto_ratio
            )));
        }
        if !(self.tolerance.min_epsilon > 0.0) {
            return Err(crate::Error::Config(format!(
                "min_epsilon must be > 0, got {}", self.tolerance.min_epsilon
            )));
        }
        if !(self.tolerance.fallback_epsilon > 0.0) {
            return Err(crate::Error::Config(format!(
                "fallback_epsilon must be > 0, got {}", self.tolerance.fallback_epsilon
            )));
        }
        crate::store::validate_namespace(&self.store.namespace)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        Ok(())
    }

    /// Load config from file
    pub fn load(path: &PathBuf) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from default location
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &PathBuf) -> Result<(), crate::Error> {
        let content = toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;

        // Create parent directories
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save to default location
    pub fn save_default(&self) -> Result<(), crate::Error> {
        self.save(&Self::default_path())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        crate::store::FileStore::default_directory().join("config.toml")
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }
}
