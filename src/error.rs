//! Error types for lockman.
//!
//! Only two failures are meaningful to a caller of the lock API:
//! a name conflict ([`LockmanError::LockError`]) and a broken shared store
//! ([`LockmanError::StoreUnavailable`]). The remaining variants belong to the
//! CLI and configuration layers.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for lockman operations.
#[derive(Error, Debug)]
pub enum LockmanError {
    /// User provided invalid arguments or configuration.
    #[error("{0}")]
    UserError(String),

    /// The requested name is held by a live lock with a different owner.
    ///
    /// Callers are expected to retry with their own backoff policy.
    #[error("Lock acquisition failed: {0}")]
    LockError(String),

    /// The shared lock store cannot be opened, locked, read, or written.
    ///
    /// This is fatal to the operation and must not be treated as a conflict.
    #[error("Lock store unavailable: {0}")]
    StoreUnavailable(String),

    /// A child process run under `lockman exec` exited unsuccessfully.
    #[error("command exited with status {0}")]
    CommandFailed(i32),
}

impl LockmanError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LockmanError::UserError(_) => exit_codes::USER_ERROR,
            LockmanError::LockError(_) => exit_codes::LOCK_FAILURE,
            LockmanError::StoreUnavailable(_) => exit_codes::STORE_UNAVAILABLE,
            LockmanError::CommandFailed(code) => *code,
        }
    }

    /// True for the name-conflict case only.
    pub fn is_conflict(&self) -> bool {
        matches!(self, LockmanError::LockError(_))
    }
}

/// Result type alias for lockman operations.
pub type Result<T> = std::result::Result<T, LockmanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = LockmanError::UserError("bad argument".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn lock_error_has_correct_exit_code() {
        let err = LockmanError::LockError("document-42".to_string());
        assert_eq!(err.exit_code(), exit_codes::LOCK_FAILURE);
        assert!(err.is_conflict());
    }

    #[test]
    fn store_unavailable_is_not_a_conflict() {
        let err = LockmanError::StoreUnavailable("permission denied".to_string());
        assert_eq!(err.exit_code(), exit_codes::STORE_UNAVAILABLE);
        assert!(!err.is_conflict());
    }

    #[test]
    fn command_failed_passes_child_code_through() {
        let err = LockmanError::CommandFailed(17);
        assert_eq!(err.exit_code(), 17);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = LockmanError::LockError("'job' is held by another owner".to_string());
        assert_eq!(
            err.to_string(),
            "Lock acquisition failed: 'job' is held by another owner"
        );

        let err = LockmanError::StoreUnavailable("disk full".to_string());
        assert_eq!(err.to_string(), "Lock store unavailable: disk full");
    }
}
