//! Shared test utilities for the confsync workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`]: [`SourceRepo`](git::SourceRepo), a real repository to sync from
//! - [`operator`]: [`RecordingOperator`](operator::RecordingOperator), an
//!   operator that records what the dispatcher asked of it

pub mod git;
pub mod operator;

pub use git::{SourceRepo, commit_all};
pub use operator::{CallLog, OperatorCall, RecordingOperator};
