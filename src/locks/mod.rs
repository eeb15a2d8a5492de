//! Locking subsystem for lockman.
//!
//! Named, expiration-aware, mutually exclusive locks shared by unrelated
//! processes that agree only on a store location.
//!
//! # Layers
//!
//! - [`record`]: the persisted `name -> {expiration, uuid}` map and the rules
//!   for acquire, reclaim, conflict, and owner-gated release
//! - [`LockingBackend`]: the capability contract (`acquire`, `release`, `purge`)
//! - [`FileLock`]: the shared-file backend, safe across threads and processes
//! - [`MemoryLock`]: a single-process backend with the same rules
//! - [`LockManager`]: the service applications hold, applying the default
//!   timeout and handing out [`LockGuard`]s
//!
//! # RAII Guards
//!
//! [`LockManager::acquire`] returns a guard that releases the lock when
//! dropped. If the release fails during drop, a warning is logged but the
//! program does not crash. Use [`LockGuard::into_handle`] to keep the lock past
//! the guard's lifetime and release it later by handle.

mod backend;
mod file;
mod handle;
mod manager;
mod memory;
pub mod record;

pub use backend::LockingBackend;
pub use file::{FileLock, store_path};
pub use handle::LockHandle;
pub use manager::LockManager;
pub use memory::MemoryLock;
pub use record::{LockRecord, LockStore};

use crate::error::Result;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// RAII guard for an acquired lock.
///
/// When dropped, the lock is released through the backend that issued it.
pub struct LockGuard {
    backend: Arc<dyn LockingBackend>,
    handle: LockHandle,

    /// Whether the lock has been released or detached manually.
    released: bool,
}

impl LockGuard {
    fn new(backend: Arc<dyn LockingBackend>, handle: LockHandle) -> Self {
        Self {
            backend,
            handle,
            released: false,
        }
    }

    pub fn handle(&self) -> &LockHandle {
        &self.handle
    }

    pub fn name(&self) -> &str {
        self.handle.name()
    }

    pub fn owner(&self) -> &str {
        self.handle.owner()
    }

    /// Manually release the lock, surfacing store errors to the caller.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        self.backend.release(&self.handle)
    }

    /// Stop managing the lock and return its handle. The lock stays held.
    pub fn into_handle(mut self) -> LockHandle {
        self.released = true;
        self.handle.clone()
    }
}

impl fmt::Debug for LockGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockGuard")
            .field("handle", &self.handle)
            .field("released", &self.released)
            .finish_non_exhaustive()
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if !self.released
            && let Err(e) = self.backend.release(&self.handle)
        {
            warn!(
                lock = self.handle.name(),
                owner = self.handle.owner(),
                error = %e,
                "failed to release lock"
            );
        }
    }
}
