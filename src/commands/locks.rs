//! Implementations of `acquire`, `release`, `purge`, and `list`.

use crate::cli::{AcquireArgs, ReleaseArgs};
use crate::error::{LockmanError, Result};
use crate::locks::{LockHandle, LockManager, LockRecord};
use chrono::{DateTime, Utc};

/// Acquire a lock and print its handle; the lock is left held.
pub fn cmd_acquire(manager: &LockManager, args: AcquireArgs) -> Result<()> {
    let handle = acquire_detached(manager, &args)?;

    let json = serde_json::to_string(&handle)
        .map_err(|e| LockmanError::UserError(format!("failed to serialize lock handle: {}", e)))?;
    println!("{}", json);

    Ok(())
}

fn acquire_detached(manager: &LockManager, args: &AcquireArgs) -> Result<LockHandle> {
    Ok(manager.acquire(&args.name, args.timeout)?.into_handle())
}

pub fn cmd_release(manager: &LockManager, args: ReleaseArgs) -> Result<()> {
    let handle = LockHandle::new(args.name, None, args.owner);
    manager.release(&handle)?;

    println!("Released lock: {}", handle.name());
    Ok(())
}

pub fn cmd_purge(manager: &LockManager) -> Result<()> {
    manager.purge()?;

    println!("Purged all locks.");
    Ok(())
}

pub fn cmd_list(manager: &LockManager) -> Result<()> {
    let store = manager.list()?;

    if store.is_empty() {
        println!("No active locks.");
        return Ok(());
    }

    let now = Utc::now().timestamp();

    println!("Locks ({}):", store.len());
    println!();

    for (name, record) in store.iter() {
        println!("  {}:", name);
        println!("    Owner:      {}", record.owner);
        println!("    Expires:    {}", describe_expiration(record, now));
        println!();
    }

    let expired = store.iter().filter(|(_, r)| r.is_expired(now)).count();
    if expired > 0 {
        println!(
            "Note: {} lock(s) are expired and will be reclaimed by the next acquire.",
            expired
        );
    }

    Ok(())
}

fn describe_expiration(record: &LockRecord, now: i64) -> String {
    if record.expiration == 0 {
        return "never".to_string();
    }

    let at = DateTime::<Utc>::from_timestamp(record.expiration, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| record.expiration.to_string());

    if record.is_expired(now) {
        format!("{} (EXPIRED)", at)
    } else {
        format!("{} (in {}s)", at, record.expiration - now)
    }
}
