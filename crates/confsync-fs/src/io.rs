//! Atomic I/O operations with file locking

use std::fs::{self, File, Metadata, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::checksum::{compute_bytes_checksum, compute_file_checksum};
use crate::{Error, Result};

/// Result of [`write_if_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was created or its content replaced.
    Written,
    /// The file already held exactly this content.
    Unchanged,
}

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename so readers never observe a partial file.
/// Missing parent directories are created. A symlink at `path` is written
/// through to the file it points at, and an existing file keeps its
/// permissions (and, on unix, its owner).
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let target = resolve_target(path)?;
    let path = target.as_path();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| Error::NoFileName {
            path: path.to_path_buf(),
        })?
        .to_string_lossy();

    // Same directory keeps the rename on one filesystem
    let temp_path = path.with_file_name(format!(".{}.{}.tmp", file_name, std::process::id()));

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    let result = fill_temp(&mut temp_file, &temp_path, path, content)
        .and_then(|()| fs::rename(&temp_path, path).map_err(|e| Error::io(path, e)));

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

/// Follow a symlink at `path` to the file it names.
fn resolve_target(path: &Path) -> Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => {
            dunce::canonicalize(path).map_err(|e| Error::io(path, e))
        }
        _ => Ok(path.to_path_buf()),
    }
}

fn fill_temp(temp_file: &mut File, temp_path: &Path, path: &Path, content: &[u8]) -> Result<()> {
    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(temp_path, e))?;

    if let Ok(existing) = fs::metadata(path) {
        copy_metadata(&existing, temp_file, temp_path)?;
    }

    temp_file.sync_all().map_err(|e| Error::io(temp_path, e))?;

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })
}

fn copy_metadata(existing: &Metadata, temp_file: &File, temp_path: &Path) -> Result<()> {
    temp_file
        .set_permissions(existing.permissions())
        .map_err(|e| Error::io(temp_path, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;

        let current = temp_file.metadata().map_err(|e| Error::io(temp_path, e))?;
        if (current.uid(), current.gid()) != (existing.uid(), existing.gid())
            && let Err(e) =
                std::os::unix::fs::fchown(temp_file, Some(existing.uid()), Some(existing.gid()))
        {
            // Only root may give files away; the content still gets written
            tracing::warn!(
                path = %temp_path.display(),
                error = %e,
                "Cannot keep the owner of the replaced file"
            );
        }
    }

    Ok(())
}

/// Read a file's bytes, attaching the path to any error.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| Error::io(path, e))
}

/// Atomically write `content` to `path` unless it already holds it.
pub fn write_if_changed(path: &Path, content: &[u8]) -> Result<WriteOutcome> {
    if path.is_file()
        && let Ok(existing) = compute_file_checksum(path)
        && existing == compute_bytes_checksum(content)
    {
        tracing::debug!(path = %path.display(), "Content unchanged, skipping write");
        return Ok(WriteOutcome::Unchanged);
    }

    write_atomic(path, content)?;
    Ok(WriteOutcome::Written)
}
