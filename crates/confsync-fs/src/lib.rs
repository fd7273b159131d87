//! Filesystem helpers for ConfSync
//!
//! Provides the read-only directory probe used by the repository state
//! checker and the atomic, lock-guarded writes used for direct-copy
//! distribution.

pub mod checksum;
pub mod constants;
pub mod dir;
pub mod error;
pub mod io;

pub use constants::CONFIG_FILE_NAME;
pub use dir::{DirState, probe_dir};
pub use error::{Error, Result};
pub use io::{WriteOutcome, write_if_changed};
