//! Configuration-driven file distribution for ConfSync.
//!
//! After the working copy has been synchronized, the [`Updater`] reads
//! `config.json` from it and distributes files in one of two ways:
//!
//! 1. **Direct copy**: each source file is copied into a destination
//!    directory.
//! 2. **Task routing**: each source file is handed to one or more named
//!    [`Operator`]s, which then each run their queued work once.
//!
//! Operators are supplied by the embedding application; this crate only
//! defines the contract and the [`OperatorRegistry`] that looks them up.

pub mod config;
pub mod copy;
pub mod dispatcher;
pub mod error;
pub mod operator;
pub mod registry;

pub use config::{CopyEntry, RoutingConfig, TaskEntry, TaskSpec, load};
pub use dispatcher::{UpdateReport, Updater, UpdaterConfig};
pub use error::{Error, Result};
pub use operator::{BoxError, Operator, OperatorResult};
pub use registry::OperatorRegistry;
