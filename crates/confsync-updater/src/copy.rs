//! Direct-copy distribution

use std::path::{Path, PathBuf};

use confsync_fs::io::read_bytes;
use confsync_fs::{WriteOutcome, write_if_changed};

use crate::config::CopyEntry;
use crate::dispatcher::UpdateReport;
use crate::{Error, Result};

/// Copy every entry's source file into its destination directory.
///
/// All sources are read before anything is written, so a missing source
/// aborts the update with nothing distributed. Writes then happen in entry
/// order and stop at the first failure.
pub fn copy_entries(source_dir: &Path, entries: &[CopyEntry]) -> Result<UpdateReport> {
    let mut staged: Vec<(PathBuf, Vec<u8>)> = Vec::with_capacity(entries.len());

    for entry in entries {
        let path = source_dir.join(&entry.source);
        let content = read_bytes(&path).map_err(|source| Error::SourceRead {
            path: path.clone(),
            source,
        })?;
        staged.push((entry.destination.join(entry.file_name()), content));
    }

    let mut report = UpdateReport::default();
    for (target, content) in staged {
        match write_if_changed(&target, &content)? {
            WriteOutcome::Written => {
                tracing::info!(path = %target.display(), "Copied file");
                report.written.push(target);
            }
            WriteOutcome::Unchanged => {
                tracing::debug!(path = %target.display(), "Destination already up to date");
                report.unchanged.push(target);
            }
        }
    }

    Ok(report)
}
