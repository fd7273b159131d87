//! Repository synchronization for ConfSync
//!
//! Reconciles a local directory with a remote git repository across
//! repeated runs: the first run clones, later runs fast-forward, and a
//! directory holding foreign content is refused.

pub mod error;
pub mod helpers;
pub mod provider;
pub mod state;
pub mod syncer;

pub use error::{Error, Result};
pub use provider::Synchronizer;
pub use state::{RepoState, classify};
pub use syncer::{GitSyncer, SyncOutcome, SyncTarget};
