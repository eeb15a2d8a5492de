//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for lockman.
///
/// This struct represents the contents of `lockman.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Lock backend to use.
    #[serde(default)]
    pub backend: BackendKind,

    /// Directory holding the shared store file.
    #[serde(default = "default_temporary_directory")]
    pub temporary_directory: PathBuf,

    /// Timeout in seconds applied when a caller does not give one.
    #[serde(default = "default_lock_timeout")]
    pub default_lock_timeout: u64,

    /// Shared secret the store file name is derived from.
    ///
    /// Every cooperating process must use the same value.
    #[serde(default = "default_secret_key")]
    pub secret_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            temporary_directory: default_temporary_directory(),
            default_lock_timeout: default_lock_timeout(),
            secret_key: default_secret_key(),
        }
    }
}
