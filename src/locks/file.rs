//! File-backed lock store.
//!
//! All cooperating processes share one JSON file. Every read-modify-write
//! cycle runs under two nested exclusion layers:
//!
//! 1. a process-local mutex owned by the [`FileLock`] value, which serializes
//!    threads of this process;
//! 2. an exclusive advisory lock on the store file (`flock` on Unix,
//!    `LockFileEx` on Windows via [`fs2`]), which serializes processes.
//!
//! The advisory lock is tied to the file that every process opened, so the
//! store is rewritten in place (truncate, then write) and never replaced by
//! rename.

use super::backend::LockingBackend;
use super::handle::LockHandle;
use super::record::{Acquired, LockStore, Released};
use crate::error::{LockmanError, Result};
use chrono::Utc;
use fs2::FileExt;
use sha2::{Digest, Sha256};
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};

/// Derive the store file path shared by every process using `secret`.
///
/// The file name is the hex SHA-256 of the secret, so processes agree on the
/// location without coordinating.
pub fn store_path(temporary_directory: &Path, secret: &str) -> PathBuf {
    let digest = Sha256::digest(secret.as_bytes());
    temporary_directory.join(const_hex::encode(digest))
}

/// Whether a cycle should write the store back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Commit {
    Write,
    Skip,
}

/// Lock backend over a single shared store file.
#[derive(Debug)]
pub struct FileLock {
    path: PathBuf,
    local: Mutex<()>,
}

impl FileLock {
    /// Open the store at `path`, creating the parent directory and an empty
    /// file if they do not exist yet. Existing content is left untouched.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| {
                LockmanError::StoreUnavailable(format!(
                    "failed to create store directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .map_err(|e| store_error("create", &path, e))?;

        debug!(path = %path.display(), "lock store ready");

        Ok(Self {
            path,
            local: Mutex::new(()),
        })
    }

    /// Path of the shared store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the store file and block until the exclusive advisory lock is held.
    ///
    /// The lock is released when the returned file is dropped.
    fn open_locked(&self) -> Result<File> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .map_err(|e| store_error("open", &self.path, e))?;

        FileExt::lock_exclusive(&file).map_err(|e| store_error("lock", &self.path, e))?;

        Ok(file)
    }

    /// Read and decode the whole store. Undecodable content is an empty store.
    fn read_store(&self, file: &mut File) -> Result<LockStore> {
        let mut body = Vec::new();
        file.seek(SeekFrom::Start(0))
            .and_then(|_| file.read_to_end(&mut body))
            .map_err(|e| store_error("read", &self.path, e))?;

        Ok(LockStore::from_bytes(&body).unwrap_or_else(|e| {
            warn!(
                path = %self.path.display(),
                error = %e,
                "discarding unreadable lock store content"
            );
            LockStore::new()
        }))
    }

    /// Replace the whole store content in place.
    fn write_store(&self, file: &mut File, store: &LockStore) -> Result<()> {
        let json = store.to_json().map_err(|e| {
            LockmanError::StoreUnavailable(format!("failed to encode lock store: {}", e))
        })?;

        file.set_len(0)
            .and_then(|_| file.seek(SeekFrom::Start(0)))
            .and_then(|_| file.write_all(json.as_bytes()))
            .and_then(|_| file.sync_data())
            .map_err(|e| store_error("write", &self.path, e))
    }

    /// Run one serialized read-modify-write cycle.
    ///
    /// Both exclusion layers are held for the whole cycle. If `apply` fails,
    /// nothing is written.
    fn transact<T>(
        &self,
        apply: impl FnOnce(&mut LockStore) -> Result<(T, Commit)>,
    ) -> Result<T> {
        let _local = self.local.lock().unwrap_or_else(PoisonError::into_inner);
        let mut file = self.open_locked()?;

        let mut store = self.read_store(&mut file)?;
        let (value, commit) = apply(&mut store)?;

        if commit == Commit::Write {
            self.write_store(&mut file, &store)?;
        }

        Ok(value)
    }
}

impl LockingBackend for FileLock {
    fn acquire(&self, name: &str, timeout: Option<u64>) -> Result<LockHandle> {
        let now = Utc::now().timestamp();

        self.transact(|store| match store.try_acquire(name, timeout, now) {
            Some(acquired) => {
                log_acquired(name, &acquired);
                let handle = LockHandle::new(name, timeout, &acquired.record().owner);
                Ok((handle, Commit::Write))
            }
            None => Err(LockmanError::LockError(format!(
                "'{}' is held by another owner",
                name
            ))),
        })
    }

    fn release(&self, handle: &LockHandle) -> Result<()> {
        self.transact(|store| {
            log_released(handle, store.release(handle.name(), handle.owner()));
            Ok(((), Commit::Write))
        })
    }

    fn purge(&self) -> Result<()> {
        let _local = self.local.lock().unwrap_or_else(PoisonError::into_inner);
        let file = self.open_locked()?;

        file.set_len(0)
            .and_then(|_| file.sync_data())
            .map_err(|e| store_error("truncate", &self.path, e))?;

        debug!(path = %self.path.display(), "purged all locks");
        Ok(())
    }

    fn list(&self) -> Result<LockStore> {
        self.transact(|store| Ok((std::mem::take(store), Commit::Skip)))
    }
}

pub(super) fn log_acquired(name: &str, acquired: &Acquired) {
    match acquired {
        Acquired::Created(record) => debug!(
            lock = name,
            owner = %record.owner,
            expiration = record.expiration,
            "acquired lock"
        ),
        Acquired::Reclaimed {
            record,
            previous_owner,
        } => debug!(
            lock = name,
            owner = %record.owner,
            previous_owner = %previous_owner,
            expiration = record.expiration,
            "reclaimed expired lock"
        ),
    }
}

pub(super) fn log_released(handle: &LockHandle, released: Released) {
    match released {
        Released::Removed => debug!(lock = handle.name(), owner = handle.owner(), "released lock"),
        Released::OwnerMismatch => debug!(
            lock = handle.name(),
            owner = handle.owner(),
            "lock was reclaimed by another owner; release ignored"
        ),
        Released::Missing => debug!(
            lock = handle.name(),
            owner = handle.owner(),
            "lock already gone; release ignored"
        ),
    }
}

fn store_error(action: &str, path: &Path, err: std::io::Error) -> LockmanError {
    LockmanError::StoreUnavailable(format!(
        "failed to {} lock store '{}': {}",
        action,
        path.display(),
        err
    ))
}
