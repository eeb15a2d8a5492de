//! Lockman: cross-process named locks over a shared lock file.
//!
//! Applications build one [`locks::LockManager`] at startup, usually from a
//! [`config::Config`], and clone it into whatever needs mutual exclusion:
//!
//! ```no_run
//! use lockman::config::Config;
//! use lockman::locks::LockManager;
//!
//! let manager = LockManager::from_config(&Config::default())?;
//! manager.purge()?; // drop locks left behind by a crashed run
//!
//! let guard = manager.acquire("document-42-versions", Some(60))?;
//! // ... only one process works on document 42 here ...
//! guard.release()?;
//! # Ok::<(), lockman::error::LockmanError>(())
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod locks;

#[cfg(test)]
mod test_support;
