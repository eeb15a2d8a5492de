//! Config enums and serde default functions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which lock backend a [`super::Config`] selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Shared store file; excludes threads and processes (default).
    #[default]
    File,
    /// In-process map; excludes threads of one process only.
    Memory,
}

// Default value functions for serde
pub(crate) fn default_temporary_directory() -> PathBuf {
    std::env::temp_dir()
}
pub(crate) fn default_lock_timeout() -> u64 {
    30
}
pub(crate) fn default_secret_key() -> String {
    "lockman".to_string()
}
