use serde::{Deserialize, Serialize};

/// Token returned by a successful acquire and required to release.
///
/// Release is gated on `owner`, so presenting a handle whose lock has since
/// expired and been reclaimed never disturbs the new holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockHandle {
    name: String,
    timeout: Option<u64>,
    owner: String,
}

impl LockHandle {
    pub fn new(name: impl Into<String>, timeout: Option<u64>, owner: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            timeout,
            owner: owner.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Timeout in seconds the lock was acquired with, `None` if it never expires.
    pub fn timeout(&self) -> Option<u64> {
        self.timeout
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }
}
