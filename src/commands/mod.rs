//! Command implementations for lockman.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Every command except `init` resolves the config and
//! builds a [`LockManager`] first.

mod exec;
mod init;
mod locks;

use crate::cli::{Cli, Command};
use crate::config::{BackendKind, Config};
use crate::error::{LockmanError, Result};
use crate::locks::LockManager;
use std::path::Path;

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Command::Init(args) => init::cmd_init(config_path, args),
        Command::Path => {
            let config = Config::resolve(config_path)?;
            println!("{}", config.store_path().display());
            Ok(())
        }
        Command::Acquire(args) => locks::cmd_acquire(&shared_manager(config_path)?, args),
        Command::Release(args) => locks::cmd_release(&shared_manager(config_path)?, args),
        Command::Purge => locks::cmd_purge(&shared_manager(config_path)?),
        Command::List => locks::cmd_list(&shared_manager(config_path)?),
        Command::Exec(args) => {
            let config = Config::resolve(config_path)?;
            exec::cmd_exec(&LockManager::from_config(&config)?, args)
        }
    }
}

/// Build a manager whose locks outlive this process.
///
/// Locks taken with the in-memory backend vanish when the command exits, so
/// commands that leave state behind refuse it.
fn shared_manager(config_path: Option<&Path>) -> Result<LockManager> {
    let config = Config::resolve(config_path)?;

    if config.backend == BackendKind::Memory {
        return Err(LockmanError::UserError(
            "the memory backend cannot share locks between lockman invocations; \
             set `backend: file` in the config"
                .to_string(),
        ));
    }

    LockManager::from_config(&config)
}
