//! CLI argument parsing for lockman.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Lockman: named locks shared between processes through one lock file.
///
/// Every process configured with the same temporary directory and secret key
/// uses the same store file and therefore sees the same locks.
#[derive(Parser, Debug)]
#[command(name = "lockman")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file (default: ./lockman.yaml if present).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for lockman.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default config file.
    Init(InitArgs),

    /// Acquire a lock and print its handle as JSON.
    ///
    /// The lock stays held after the command exits; release it with
    /// `lockman release`, or let it expire.
    Acquire(AcquireArgs),

    /// Release a lock by name and owner id.
    ///
    /// Releasing a lock that expired and was taken by someone else does nothing.
    Release(ReleaseArgs),

    /// Remove every lock in the store.
    Purge,

    /// List all locks in the store.
    List,

    /// Print the store file path.
    Path,

    /// Run a command while holding a lock.
    ///
    /// The lock is released when the command exits, and the command's exit
    /// code is passed through.
    Exec(ExecArgs),
}

/// Arguments for the `init` command.
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `acquire` command.
#[derive(Parser, Debug)]
pub struct AcquireArgs {
    /// Lock name.
    pub name: String,

    /// Seconds until the lock may be reclaimed (0 = never; default from config).
    #[arg(short, long)]
    pub timeout: Option<u64>,
}

/// Arguments for the `release` command.
#[derive(Parser, Debug)]
pub struct ReleaseArgs {
    /// Lock name.
    pub name: String,

    /// Owner id printed by `acquire`.
    #[arg(long)]
    pub owner: String,
}

/// Arguments for the `exec` command.
#[derive(Parser, Debug)]
pub struct ExecArgs {
    /// Lock name.
    pub name: String,

    /// Seconds until the lock may be reclaimed (0 = never; default from config).
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Command and arguments to run.
    #[arg(last = true, required = true)]
    pub command: Vec<String>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
