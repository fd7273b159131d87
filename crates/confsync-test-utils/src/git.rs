//! Git repository fixtures built with `git2`.
//!
//! No `git` binary or global git configuration is needed: commits are made
//! with a fixed signature.

use std::fs;
use std::path::Path;

use git2::{Commit, IndexAddOption, Oid, Repository, Signature};
use tempfile::TempDir;

/// Stage everything in the working tree of `repo` and commit it on HEAD.
///
/// # Panics
/// Panics if any git operation fails.
pub fn commit_all(repo: &Repository, message: &str) -> Oid {
    let mut index = repo.index().expect("commit_all: failed to open index");
    index
        .add_all(["*"], IndexAddOption::DEFAULT, None)
        .expect("commit_all: failed to stage files");
    index.write().expect("commit_all: failed to write index");

    let tree_id = index.write_tree().expect("commit_all: failed to write tree");
    let tree = repo.find_tree(tree_id).expect("commit_all: tree vanished");
    let sig = Signature::now("Test User", "test@test.com").expect("commit_all: bad signature");

    let parents: Vec<Commit<'_>> = match repo.head() {
        Ok(head) => vec![head.peel_to_commit().expect("commit_all: HEAD is not a commit")],
        Err(_) => Vec::new(),
    };
    let parent_refs: Vec<&Commit<'_>> = parents.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
        .unwrap_or_else(|e| panic!("commit_all: failed to commit: {e}"))
}

/// A non-bare repository in a temporary directory, used as the remote that
/// working copies are cloned from and pulled from.
///
/// # Example
///
/// ```rust,no_run
/// use confsync_test_utils::SourceRepo;
///
/// let source = SourceRepo::with_files(&[("config.json", b"{}")]);
/// source.commit_files(&[("test2.txt", b"hello")], "second commit");
/// ```
pub struct SourceRepo {
    temp_dir: TempDir,
    repo: Repository,
}

impl Default for SourceRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceRepo {
    /// Initialise an empty repository (no commits).
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("SourceRepo: failed to create temp dir");
        let repo = Repository::init(temp_dir.path()).unwrap_or_else(|e| {
            panic!(
                "SourceRepo: failed to init repository at {}: {e}",
                temp_dir.path().display()
            )
        });
        Self { temp_dir, repo }
    }

    /// Initialise a repository whose first commit holds `files`.
    pub fn with_files(files: &[(&str, &[u8])]) -> Self {
        let source = Self::new();
        source.commit_files(files, "initial commit");
        source
    }

    /// Root of the repository's working tree.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Clone URL for the repository (a local path).
    pub fn url(&self) -> String {
        self.path().to_string_lossy().into_owned()
    }

    /// The underlying `git2` handle.
    pub fn repo(&self) -> &Repository {
        &self.repo
    }

    /// Write `files` (relative paths) into the working tree and commit them.
    pub fn commit_files(&self, files: &[(&str, &[u8])], message: &str) -> Oid {
        for (name, content) in files {
            let path = self.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("SourceRepo: failed to create directories");
            }
            fs::write(&path, content)
                .unwrap_or_else(|e| panic!("SourceRepo: failed to write {name}: {e}"));
        }
        commit_all(&self.repo, message)
    }

    /// Commit currently at HEAD.
    pub fn head(&self) -> Oid {
        self.repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .map(|c| c.id())
            .expect("SourceRepo: repository has no commits")
    }
}
