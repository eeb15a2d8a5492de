//! The lock service handed to the rest of an application.

use super::backend::LockingBackend;
use super::file::FileLock;
use super::handle::LockHandle;
use super::memory::MemoryLock;
use super::record::LockStore;
use super::LockGuard;
use crate::config::{BackendKind, Config};
use crate::error::Result;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Backend plus the default timeout applied when a caller does not give one.
///
/// Construct once at startup and clone it into whatever needs locking;
/// clones share the same backend.
#[derive(Clone)]
pub struct LockManager {
    backend: Arc<dyn LockingBackend>,
    default_timeout: u64,
}

impl LockManager {
    pub fn new(backend: Arc<dyn LockingBackend>, default_timeout: u64) -> Self {
        Self {
            backend,
            default_timeout,
        }
    }

    /// Build the backend selected by `config`.
    ///
    /// For the file backend this creates the store file if it is missing.
    pub fn from_config(config: &Config) -> Result<Self> {
        let backend: Arc<dyn LockingBackend> = match config.backend {
            BackendKind::File => Arc::new(FileLock::open(config.store_path())?),
            BackendKind::Memory => Arc::new(MemoryLock::new()),
        };
        debug!(backend = ?config.backend, "lock manager initialized");

        Ok(Self::new(backend, config.default_lock_timeout))
    }

    /// Acquire `name`.
    ///
    /// `None` uses the default timeout; `Some(0)` never expires.
    ///
    /// # Errors
    ///
    /// * `LockmanError::LockError` - `name` is held by a live lock
    /// * `LockmanError::StoreUnavailable` - the store itself is broken
    pub fn acquire(&self, name: &str, timeout: Option<u64>) -> Result<LockGuard> {
        let handle = self.backend.acquire(name, self.effective_timeout(timeout))?;
        Ok(LockGuard::new(Arc::clone(&self.backend), handle))
    }

    /// Release a handle obtained earlier, possibly by another process.
    pub fn release(&self, handle: &LockHandle) -> Result<()> {
        self.backend.release(handle)
    }

    /// Clear every lock. Meant for startup, to drop locks left by a crashed run.
    pub fn purge(&self) -> Result<()> {
        self.backend.purge()
    }

    pub fn list(&self) -> Result<LockStore> {
        self.backend.list()
    }

    pub fn default_timeout(&self) -> u64 {
        self.default_timeout
    }

    fn effective_timeout(&self, timeout: Option<u64>) -> Option<u64> {
        match timeout.unwrap_or(self.default_timeout) {
            0 => None,
            secs => Some(secs),
        }
    }
}

impl fmt::Debug for LockManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockManager")
            .field("default_timeout", &self.default_timeout)
            .finish_non_exhaustive()
    }
}
