//! Filesystem utilities for lockman.

pub mod atomic;

pub use atomic::atomic_write_file;
