//! In-process lock backend.
//!
//! Same acquire, reclaim, and release rules as [`super::FileLock`], but the
//! store lives in memory, so it only excludes threads of the current process.

use super::backend::LockingBackend;
use super::file::{log_acquired, log_released};
use super::handle::LockHandle;
use super::record::LockStore;
use crate::error::{LockmanError, Result};
use chrono::Utc;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

#[derive(Debug, Default)]
pub struct MemoryLock {
    store: Mutex<LockStore>,
}

impl MemoryLock {
    pub fn new() -> Self {
        Self::default()
    }

    fn store(&self) -> MutexGuard<'_, LockStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LockingBackend for MemoryLock {
    fn acquire(&self, name: &str, timeout: Option<u64>) -> Result<LockHandle> {
        let now = Utc::now().timestamp();
        let mut store = self.store();

        let acquired = store.try_acquire(name, timeout, now).ok_or_else(|| {
            LockmanError::LockError(format!("'{}' is held by another owner", name))
        })?;
        log_acquired(name, &acquired);

        Ok(LockHandle::new(name, timeout, &acquired.record().owner))
    }

    fn release(&self, handle: &LockHandle) -> Result<()> {
        let released = self.store().release(handle.name(), handle.owner());
        log_released(handle, released);
        Ok(())
    }

    fn purge(&self) -> Result<()> {
        self.store().clear();
        debug!("purged all in-memory locks");
        Ok(())
    }

    fn list(&self) -> Result<LockStore> {
        Ok(self.store().clone())
    }
}
