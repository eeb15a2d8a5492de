//! Implementation of the `lockman init` command.
//!
//! Writes a config file holding the built-in defaults, so every process that
//! should share locks can be pointed at the same values.

use crate::cli::InitArgs;
use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::error::{LockmanError, Result};
use crate::fs::atomic_write_file;
use std::path::{Path, PathBuf};

const HEADER: &str = "\
# lockman configuration
#
# Processes share locks only when temporary_directory and secret_key match.
";

/// Execute the `lockman init` command.
pub fn cmd_init(config_path: Option<&Path>, args: InitArgs) -> Result<()> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    write_default_config(&path, args.force)?;

    println!("Wrote config: {}", path.display());
    println!("Store file:   {}", Config::default().store_path().display());
    Ok(())
}

fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(LockmanError::UserError(format!(
            "config file '{}' already exists; use --force to overwrite",
            path.display()
        )));
    }

    let body = format!("{}{}", HEADER, Config::default().to_yaml()?);
    atomic_write_file(path, &body)
}
