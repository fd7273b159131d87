//! Classification of a local path before synchronization

use std::path::Path;

use confsync_fs::constants::GIT_DIR_NAME;
use confsync_fs::{DirState, probe_dir};
use git2::Repository;

use crate::{Error, Result};

/// What the synchronizer finds at the local path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoState {
    /// Nothing exists at the path.
    Absent,
    /// An empty directory.
    Empty,
    /// Foreign content: files that are not a working copy rooted here.
    NonEmptyNonRepo,
    /// The root of a non-bare git working copy.
    ExistingRepo,
}

/// Classify `path` without modifying it.
///
/// Filesystem errors other than "not found" surface as [`Error::Probe`].
/// A regular file, a bare repository and a directory nested inside some
/// other working copy are all [`RepoState::NonEmptyNonRepo`].
pub fn classify(path: &Path) -> Result<RepoState> {
    let dir_state = probe_dir(path).map_err(|source| Error::Probe {
        path: path.to_path_buf(),
        source,
    })?;

    let state = match dir_state {
        DirState::Missing => RepoState::Absent,
        DirState::Empty => RepoState::Empty,
        DirState::NotADirectory => RepoState::NonEmptyNonRepo,
        DirState::Populated if is_working_copy_root(path) => RepoState::ExistingRepo,
        DirState::Populated => RepoState::NonEmptyNonRepo,
    };

    tracing::debug!(path = %path.display(), ?state, "Classified local path");
    Ok(state)
}

fn is_working_copy_root(path: &Path) -> bool {
    if !path.join(GIT_DIR_NAME).exists() {
        return false;
    }

    let repo = match Repository::open(path) {
        Ok(repo) => repo,
        Err(e) => {
            // Interrupted clones leave a .git that libgit2 cannot open
            tracing::debug!(path = %path.display(), error = %e, "Not an openable repository");
            return false;
        }
    };

    if repo.is_bare() {
        return false;
    }

    match (repo.workdir(), dunce::canonicalize(path)) {
        (Some(workdir), Ok(expected)) => dunce::canonicalize(workdir)
            .map(|actual| actual == expected)
            .unwrap_or(false),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn fake_git_dir_is_not_a_repository() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();

        assert_eq!(classify(temp.path()).unwrap(), RepoState::NonEmptyNonRepo);
    }

    #[test]
    fn initialised_repository_is_existing() {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path()).unwrap();

        assert_eq!(classify(temp.path()).unwrap(), RepoState::ExistingRepo);
    }

    #[test]
    fn bare_repository_is_foreign() {
        let temp = TempDir::new().unwrap();
        Repository::init_bare(temp.path()).unwrap();

        assert_eq!(classify(temp.path()).unwrap(), RepoState::NonEmptyNonRepo);
    }
}
