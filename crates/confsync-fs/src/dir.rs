//! Read-only directory probe

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::{Error, Result};

/// What a path holds, as far as the filesystem can tell without parsing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirState {
    /// Nothing exists at the path.
    Missing,
    /// A directory with no entries.
    Empty,
    /// A directory with at least one entry.
    Populated,
    /// Something other than a directory (a regular file, a socket, ...).
    NotADirectory,
}

/// Probe `path` without modifying anything.
///
/// Only "not found" maps to [`DirState::Missing`]. Every other failure,
/// permission denied included, is returned as [`Error::Io`].
pub fn probe_dir(path: &Path) -> Result<DirState> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(DirState::Missing),
        Err(e) => return Err(Error::io(path, e)),
    };

    if !metadata.is_dir() {
        return Ok(DirState::NotADirectory);
    }

    let mut entries = fs::read_dir(path).map_err(|e| Error::io(path, e))?;
    match entries.next() {
        None => Ok(DirState::Empty),
        Some(Ok(_)) => Ok(DirState::Populated),
        Some(Err(e)) => Err(Error::io(path, e)),
    }
}
