//! Implementation of the `lockman exec` command.

use crate::cli::ExecArgs;
use crate::error::{LockmanError, Result};
use crate::locks::LockManager;
use std::process::Command;
use tracing::debug;

/// Run a child process while holding a lock.
///
/// The lock is released after the child exits, whatever its status. A
/// non-zero exit is returned as [`LockmanError::CommandFailed`] so the CLI
/// can pass the code through.
pub fn cmd_exec(manager: &LockManager, args: ExecArgs) -> Result<()> {
    let (program, rest) = args
        .command
        .split_first()
        .ok_or_else(|| LockmanError::UserError("no command given".to_string()))?;

    let guard = manager.acquire(&args.name, args.timeout)?;
    debug!(lock = guard.name(), program = %program, "running command under lock");

    let status = Command::new(program).args(rest).status();
    guard.release()?;

    let status = status.map_err(|e| {
        LockmanError::UserError(format!("failed to run '{}': {}", program, e))
    })?;

    if status.success() {
        Ok(())
    } else {
        Err(LockmanError::CommandFailed(status.code().unwrap_or(1)))
    }
}
