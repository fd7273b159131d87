//! Shared git2 helper functions for clone and fast-forward
//!
//! These keep the libgit2 plumbing out of [`GitSyncer`](crate::GitSyncer),
//! which only decides which of them to call.

use std::fs;
use std::path::Path;

use git2::build::{CheckoutBuilder, RepoBuilder};
use git2::{ErrorCode, Oid, Repository};

use crate::{Error, Result};

/// Result of [`fast_forward`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullOutcome {
    /// The local branch already contains the remote tip.
    UpToDate { head: Option<Oid> },
    /// The local branch moved from `from` (None if it was unborn) to `to`.
    FastForwarded { from: Option<Oid>, to: Oid },
}

/// Clone `remote` into `path`, creating missing parent directories.
///
/// Returns the commit checked out, or `None` when the remote has no
/// commits yet.
pub fn clone_into(remote: &str, path: &Path) -> Result<Option<Oid>> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| confsync_fs::Error::io(parent, e))?;
    }

    let repo = RepoBuilder::new()
        .clone(remote, path)
        .map_err(|source| Error::CloneFailed {
            remote: remote.to_string(),
            path: path.to_path_buf(),
            source,
        })?;

    head_commit(&repo)
}

/// Get the commit HEAD points at, or `None` on an unborn branch.
pub fn head_commit(repo: &Repository) -> Result<Option<Oid>> {
    match repo.head() {
        Ok(head) => Ok(Some(head.peel_to_commit()?.id())),
        Err(e) if e.code() == ErrorCode::UnbornBranch => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Get the branch HEAD refers to, even if that branch has no commits yet.
pub fn current_branch(repo: &Repository, path: &Path) -> Result<String> {
    let head = repo.find_reference("HEAD")?;

    head.symbolic_target()
        .and_then(|target| target.strip_prefix("refs/heads/"))
        .map(str::to_string)
        .ok_or_else(|| Error::DetachedHead {
            path: path.to_path_buf(),
        })
}

/// Fetch the current branch from `remote_name` and fast-forward onto it.
///
/// The working tree is updated with a safe checkout before the branch
/// reference moves, so local modifications that would be overwritten abort
/// the pull with [`Error::LocalChanges`] and leave the repository as it was.
/// Diverged history fails with [`Error::CannotFastForward`].
pub fn fast_forward(repo: &Repository, path: &Path, remote_name: &str) -> Result<PullOutcome> {
    let branch = current_branch(repo, path)?;

    let mut remote = repo
        .find_remote(remote_name)
        .map_err(|_| Error::RemoteNotFound {
            name: remote_name.to_string(),
            path: path.to_path_buf(),
        })?;
    let remote_url = remote.url().unwrap_or(remote_name).to_string();

    let tracking = format!("refs/remotes/{}/{}", remote_name, branch);
    let refspec = format!("+refs/heads/{}:{}", branch, tracking);

    tracing::debug!(remote = %remote_url, %branch, "Fetching");
    remote
        .fetch(&[&refspec], None, None)
        .map_err(|source| Error::FetchFailed {
            remote: remote_url.clone(),
            path: path.to_path_buf(),
            source,
        })?;

    let local = head_commit(repo)?;

    let fetched = match repo.find_reference(&tracking) {
        Ok(reference) => reference.peel_to_commit()?,
        // Empty remote cloned into an unborn branch: nothing to apply yet
        Err(e) if e.code() == ErrorCode::NotFound && local.is_none() => {
            return Ok(PullOutcome::UpToDate { head: None });
        }
        Err(e) if e.code() == ErrorCode::NotFound => {
            return Err(Error::RemoteBranchNotFound {
                remote: remote_url,
                branch,
            });
        }
        Err(e) => return Err(e.into()),
    };

    let refname = format!("refs/heads/{}", branch);

    let Some(local) = local else {
        checkout_safely(repo, path, fetched.as_object())?;
        repo.reference(
            &refname,
            fetched.id(),
            false,
            &format!("pull: initial checkout of {}", fetched.id()),
        )?;
        return Ok(PullOutcome::FastForwarded {
            from: None,
            to: fetched.id(),
        });
    };

    let annotated = repo.find_annotated_commit(fetched.id())?;
    let (analysis, _) = repo.merge_analysis(&[&annotated])?;

    if analysis.is_up_to_date() {
        return Ok(PullOutcome::UpToDate { head: Some(local) });
    }

    if analysis.is_fast_forward() {
        checkout_safely(repo, path, fetched.as_object())?;

        let mut reference = repo.find_reference(&refname)?;
        reference.set_target(
            fetched.id(),
            &format!("pull: fast-forward to {}", fetched.id()),
        )?;

        return Ok(PullOutcome::FastForwarded {
            from: Some(local),
            to: fetched.id(),
        });
    }

    Err(Error::CannotFastForward {
        path: path.to_path_buf(),
        message: format!(
            "local {} has diverged from {} at {}",
            branch,
            tracking,
            fetched.id()
        ),
    })
}

fn checkout_safely(repo: &Repository, path: &Path, target: &git2::Object<'_>) -> Result<()> {
    let mut checkout = CheckoutBuilder::new();
    checkout.safe();

    repo.checkout_tree(target, Some(&mut checkout))
        .map_err(|source| match source.code() {
            ErrorCode::Conflict | ErrorCode::MergeConflict => Error::LocalChanges {
                path: path.to_path_buf(),
                source,
            },
            _ => Error::Git(source),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_head_commit_unborn_is_none() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        assert_eq!(head_commit(&repo).unwrap(), None);
    }

    #[test]
    fn test_current_branch_of_unborn_repository() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        let branch = current_branch(&repo, temp.path()).unwrap();
        assert!(!branch.is_empty());
    }

    #[test]
    fn test_current_branch_detached_head() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        let sig = git2::Signature::now("Test User", "test@test.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let commit = repo
            .commit(Some("HEAD"), &sig, &sig, "Initial", &tree, &[])
            .unwrap();
        repo.set_head_detached(commit).unwrap();

        let err = current_branch(&repo, temp.path()).unwrap_err();
        assert!(matches!(err, Error::DetachedHead { .. }));
    }

    #[test]
    fn test_fast_forward_without_remote() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        let err = fast_forward(&repo, temp.path(), "origin").unwrap_err();
        assert!(
            matches!(err, Error::RemoteNotFound { ref name, .. } if name == "origin"),
            "got: {}",
            err
        );
    }
}
