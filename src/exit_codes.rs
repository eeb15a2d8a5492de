//! Exit code constants for the lockman CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config)
//! - 4: Lock held by another owner
//! - 5: Lock store unavailable
//!
//! `lockman exec` passes the child's own exit code through instead.

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// Lock acquisition failure: the name is held by a live, differently-owned lock.
pub const LOCK_FAILURE: i32 = 4;

/// The shared store file could not be opened, locked, read, or written.
pub const STORE_UNAVAILABLE: i32 = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, LOCK_FAILURE, STORE_UNAVAILABLE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }
}
