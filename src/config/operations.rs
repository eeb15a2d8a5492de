//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::error::{LockmanError, Result};
use crate::locks::store_path;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "lockman.yaml";

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(LockmanError::UserError)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            LockmanError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Resolve the config for a CLI invocation.
    ///
    /// An explicit path must exist. Without one, `lockman.yaml` in the working
    /// directory is used if present, otherwise the built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| LockmanError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            LockmanError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `default_lock_timeout` must be positive
    /// - `secret_key` must be non-empty
    /// - `temporary_directory` must be non-empty
    pub fn validate(&self) -> Result<()> {
        if self.default_lock_timeout == 0 {
            return Err(LockmanError::UserError(
                "config validation failed: default_lock_timeout must be greater than 0"
                    .to_string(),
            ));
        }

        if self.secret_key.is_empty() {
            return Err(LockmanError::UserError(
                "config validation failed: secret_key must be non-empty".to_string(),
            ));
        }

        if self.temporary_directory.as_os_str().is_empty() {
            return Err(LockmanError::UserError(
                "config validation failed: temporary_directory must be non-empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Path of the shared store file every process with this config uses.
    pub fn store_path(&self) -> PathBuf {
        store_path(&self.temporary_directory, &self.secret_key)
    }
}
