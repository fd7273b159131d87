//! Git-backed synchronizer: clone on first run, fast-forward afterwards

use std::path::{Path, PathBuf};

use git2::{Oid, Repository};

use crate::helpers::{self, PullOutcome};
use crate::provider::Synchronizer;
use crate::state::{RepoState, classify};
use crate::{Error, Result};

/// Remote name pulled from on existing working copies.
pub const DEFAULT_REMOTE: &str = "origin";

/// Which remote repository to mirror into which local directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTarget {
    remote_url: String,
    local_path: PathBuf,
}

impl SyncTarget {
    pub fn new(remote_url: impl Into<String>, local_path: impl Into<PathBuf>) -> Self {
        Self {
            remote_url: remote_url.into(),
            local_path: local_path.into(),
        }
    }

    /// URL or path of the remote repository.
    pub fn remote_url(&self) -> &str {
        &self.remote_url
    }

    /// Local working copy directory.
    pub fn local_path(&self) -> &Path {
        &self.local_path
    }
}

/// What a synchronization pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The working copy was created by cloning.
    Cloned { head: Option<Oid> },
    /// New commits were applied to an existing working copy.
    FastForwarded { from: Option<Oid>, to: Oid },
    /// The working copy already matched the remote.
    UpToDate { head: Option<Oid> },
}

impl SyncOutcome {
    /// Whether the working copy content may differ from before the pass.
    pub fn changed(&self) -> bool {
        !matches!(self, Self::UpToDate { .. })
    }

    /// Commit checked out after the pass, if any.
    pub fn head(&self) -> Option<Oid> {
        match self {
            Self::Cloned { head } | Self::UpToDate { head } => *head,
            Self::FastForwarded { to, .. } => Some(*to),
        }
    }
}

impl From<PullOutcome> for SyncOutcome {
    fn from(outcome: PullOutcome) -> Self {
        match outcome {
            PullOutcome::UpToDate { head } => Self::UpToDate { head },
            PullOutcome::FastForwarded { from, to } => Self::FastForwarded { from, to },
        }
    }
}

/// Keeps one local directory in step with one remote repository.
///
/// Each [`sync`](GitSyncer::sync) classifies the local path and then:
///
/// - absent or empty: clones the remote;
/// - existing working copy: fetches and fast-forwards the current branch;
/// - anything else: fails with [`Error::DestinationNotEmpty`] without
///   touching the directory.
///
/// Nothing is retried; transport errors carry the remote and path.
#[derive(Debug, Clone)]
pub struct GitSyncer {
    target: SyncTarget,
    remote_name: String,
}

impl GitSyncer {
    pub fn new(target: SyncTarget) -> Self {
        Self {
            target,
            remote_name: DEFAULT_REMOTE.to_string(),
        }
    }

    fn clone_fresh(&self) -> Result<SyncOutcome> {
        let path = self.target.local_path();
        tracing::info!(
            remote = %self.target.remote_url(),
            path = %path.display(),
            "Cloning repository"
        );

        let head = helpers::clone_into(self.target.remote_url(), path)?;
        Ok(SyncOutcome::Cloned { head })
    }

    fn pull(&self) -> Result<SyncOutcome> {
        let path = self.target.local_path();
        tracing::info!(
            remote = %self.target.remote_url(),
            path = %path.display(),
            "Pulling repository"
        );

        let repo = Repository::open(path).map_err(|source| Error::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        self.warn_on_remote_mismatch(&repo);

        let outcome = helpers::fast_forward(&repo, path, &self.remote_name)?;
        match outcome {
            PullOutcome::UpToDate { .. } => tracing::info!("Already up to date"),
            PullOutcome::FastForwarded { to, .. } => {
                tracing::info!(commit = %to, "Fast-forwarded")
            }
        }

        Ok(outcome.into())
    }

    fn warn_on_remote_mismatch(&self, repo: &Repository) {
        if let Ok(remote) = repo.find_remote(&self.remote_name)
            && let Some(url) = remote.url()
            && url != self.target.remote_url()
        {
            tracing::warn!(
                configured = %url,
                requested = %self.target.remote_url(),
                "Working copy tracks a different remote URL; pulling from the configured one"
            );
        }
    }
}

impl Synchronizer for GitSyncer {
    fn sync(&self) -> Result<SyncOutcome> {
        let path = self.target.local_path();

        match classify(path)? {
            RepoState::Absent | RepoState::Empty => self.clone_fresh(),
            RepoState::ExistingRepo => self.pull(),
            RepoState::NonEmptyNonRepo => Err(Error::DestinationNotEmpty {
                path: path.to_path_buf(),
            }),
        }
    }
}
