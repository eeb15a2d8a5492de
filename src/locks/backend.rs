//! The capability contract every lock backend implements.

use super::handle::LockHandle;
use super::record::LockStore;
use crate::error::Result;

/// A store of named, expiration-aware, mutually exclusive locks.
///
/// Callers program against this trait and never against a concrete backend.
/// Every method blocks until its read-modify-write cycle has committed.
pub trait LockingBackend: Send + Sync {
    /// Acquire `name`.
    ///
    /// `timeout` of `None` or `Some(0)` creates a lock that never expires.
    ///
    /// # Errors
    ///
    /// * `LockmanError::LockError` - `name` is held by a live lock
    /// * `LockmanError::StoreUnavailable` - the store itself is broken
    fn acquire(&self, name: &str, timeout: Option<u64>) -> Result<LockHandle>;

    /// Release the lock described by `handle`.
    ///
    /// A lock that is already gone, or that was reclaimed by another owner,
    /// is left alone and reported as success.
    fn release(&self, handle: &LockHandle) -> Result<()>;

    /// Remove every lock. Excludes all other operations while running.
    fn purge(&self) -> Result<()>;

    /// Snapshot of the current records, expired ones included.
    fn list(&self) -> Result<LockStore>;
}
