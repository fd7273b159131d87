//! Synchronizer trait

use crate::Result;
use crate::syncer::SyncOutcome;

/// Something that brings a working copy up to date and reports whether it
/// changed.
///
/// [`GitSyncer`](crate::GitSyncer) is the real implementation; the trait
/// exists so callers can drive the pipeline with other sources.
pub trait Synchronizer {
    /// Run one synchronization pass.
    fn sync(&self) -> Result<SyncOutcome>;
}
