//! Orchestration layer for ConfSync
//!
//! Ties the two pipeline stages together:
//!
//! ```text
//!            confsync-cli
//!                 |
//!           confsync-core
//!             /        \
//!   confsync-git    confsync-updater
//!             \        /
//!            confsync-fs
//! ```
//!
//! An [`Orchestrator`] synchronizes the working copy and, only when that
//! brought in new content, distributes files according to its
//! `config.json`.
//!
//! # Example
//!
//! ```no_run
//! let report = confsync_core::sync_and_update(
//!     "https://git.example.com/fleet/config.git",
//!     "/var/lib/confsync/config",
//! )?;
//! if report.changed {
//!     println!("applied {:?}", report.head);
//! }
//! # Ok::<(), confsync_core::Error>(())
//! ```

pub mod error;
pub mod orchestrator;

pub use error::{Error, Result};
pub use orchestrator::{Orchestrator, OrchestratorConfig, RunReport, sync_and_update};

// Re-exports so embedding applications need only this crate
pub use confsync_git::{SyncOutcome, SyncTarget, Synchronizer};
pub use confsync_updater::{Operator, OperatorResult, UpdateReport};
