//! Sync-then-update pipeline

use std::path::PathBuf;

use confsync_git::{GitSyncer, SyncOutcome, SyncTarget, Synchronizer};
use confsync_updater::{Operator, OperatorRegistry, UpdateReport, Updater};
use serde::Serialize;

use crate::Result;

/// Inputs for [`Orchestrator::new`].
pub struct OrchestratorConfig {
    /// Remote repository and local working copy.
    pub target: SyncTarget,
    /// Operators available to task routing, in registration order.
    pub operators: Vec<Box<dyn Operator>>,
}

impl OrchestratorConfig {
    pub fn new(target: SyncTarget) -> Self {
        Self {
            target,
            operators: Vec::new(),
        }
    }
}

/// Summary of one orchestrator run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Whether synchronization brought in new content.
    pub changed: bool,
    /// Commit checked out after synchronization, if the branch has one.
    pub head: Option<String>,
    /// What the updater did; `None` when nothing changed.
    pub update: Option<UpdateReport>,
}

/// Synchronizes a working copy and redistributes its files on change.
///
/// Operators are registered once and reused by every run. The routing
/// config is reloaded on each run that changed the working copy and is
/// not read at all otherwise.
pub struct Orchestrator {
    synchronizer: Box<dyn Synchronizer>,
    local_path: PathBuf,
    registry: OperatorRegistry,
}

impl Orchestrator {
    /// Create a git-backed orchestrator.
    ///
    /// # Errors
    ///
    /// Fails with [`confsync_updater::Error::DuplicateOperator`] (wrapped in
    /// [`Error::Update`](crate::Error::Update)) if two operators share a
    /// name.
    pub fn new(config: OrchestratorConfig) -> Result<Self> {
        let OrchestratorConfig { target, operators } = config;
        let local_path = target.local_path().to_path_buf();

        Self::with_synchronizer(Box::new(GitSyncer::new(target)), local_path, operators)
    }

    /// Create an orchestrator around any [`Synchronizer`] that maintains
    /// `local_path`.
    pub fn with_synchronizer(
        synchronizer: Box<dyn Synchronizer>,
        local_path: impl Into<PathBuf>,
        operators: Vec<Box<dyn Operator>>,
    ) -> Result<Self> {
        Ok(Self {
            synchronizer,
            local_path: local_path.into(),
            registry: OperatorRegistry::new(operators)?,
        })
    }

    /// Synchronize, then update if anything changed.
    pub fn run(&mut self) -> Result<RunReport> {
        let outcome = self.synchronizer.sync()?;
        let head = outcome.head().map(|oid| oid.to_string());

        if !outcome.changed() {
            tracing::info!(path = %self.local_path.display(), "No changes, skipping update");
            return Ok(RunReport {
                changed: false,
                head,
                update: None,
            });
        }

        log_outcome(&outcome);
        let update = self.update()?;

        Ok(RunReport {
            changed: true,
            head,
            update: Some(update),
        })
    }

    /// Distribute files from the working copy as it is now, without
    /// synchronizing first.
    pub fn update(&mut self) -> Result<UpdateReport> {
        let routing = confsync_updater::load(&self.local_path)?;

        let registry = std::mem::take(&mut self.registry);
        let mut updater = Updater::from_parts(&self.local_path, routing, registry);
        let result = updater.update();
        self.registry = updater.into_registry();

        let report = result?;
        tracing::info!(
            written = report.written.len(),
            unchanged = report.unchanged.len(),
            submitted = report.submitted,
            operators_run = report.operators_run.len(),
            "Update complete"
        );
        Ok(report)
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("local_path", &self.local_path)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

fn log_outcome(outcome: &SyncOutcome) {
    match outcome {
        SyncOutcome::Cloned { head } => {
            tracing::info!(head = ?head, "Working copy cloned, updating")
        }
        SyncOutcome::FastForwarded { from, to } => {
            tracing::info!(from = ?from, to = %to, "New commits pulled, updating")
        }
        SyncOutcome::UpToDate { .. } => {}
    }
}

/// Synchronize `local_path` with `remote_url` and, if that changed
/// anything, apply its routing config without any operators.
pub fn sync_and_update(
    remote_url: impl Into<String>,
    local_path: impl Into<PathBuf>,
) -> Result<RunReport> {
    let config = OrchestratorConfig::new(SyncTarget::new(remote_url, local_path));
    Orchestrator::new(config)?.run()
}
