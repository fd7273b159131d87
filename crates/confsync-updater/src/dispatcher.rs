//! Updater that distributes files according to the routing config
//!
//! The updater loads `config.json` once at construction and owns its
//! operators for its whole lifetime. Every [`Updater::update`] call is one
//! dispatch cycle.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::{self, RoutingConfig, TaskEntry};
use crate::copy::copy_entries;
use crate::operator::Operator;
use crate::registry::OperatorRegistry;
use crate::{Error, Result};

/// Inputs for [`Updater::new`].
pub struct UpdaterConfig {
    /// Working copy holding `config.json` and the source files.
    pub source_dir: PathBuf,
    /// Operators available to task routing, in registration order.
    pub operators: Vec<Box<dyn Operator>>,
}

impl UpdaterConfig {
    /// Config without any operators (enough for direct copy).
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            operators: Vec::new(),
        }
    }
}

/// Summary of one dispatch cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateReport {
    /// Destination files written by direct copy.
    pub written: Vec<PathBuf>,
    /// Destination files that already held the right content.
    pub unchanged: Vec<PathBuf>,
    /// Number of tasks submitted to operators.
    pub submitted: usize,
    /// Operators whose `run` was called, in call order.
    pub operators_run: Vec<String>,
}

impl UpdateReport {
    /// True if the cycle neither wrote a file nor ran an operator.
    pub fn is_empty(&self) -> bool {
        self.written.is_empty() && self.submitted == 0 && self.operators_run.is_empty()
    }
}

/// Distributes the files of one working copy.
pub struct Updater {
    source_dir: PathBuf,
    routing: RoutingConfig,
    registry: OperatorRegistry,
}

impl Updater {
    /// Load the routing config from `config.source_dir` and register the
    /// operators.
    ///
    /// # Errors
    ///
    /// Any [`load`](config::load) error, or [`Error::DuplicateOperator`] if
    /// two operators share a name.
    pub fn new(config: UpdaterConfig) -> Result<Self> {
        let UpdaterConfig {
            source_dir,
            operators,
        } = config;

        let routing = config::load(&source_dir)?;
        let registry = OperatorRegistry::new(operators)?;

        Ok(Self::from_parts(source_dir, routing, registry))
    }

    /// Assemble an updater from an already loaded config and registry.
    pub fn from_parts(
        source_dir: impl Into<PathBuf>,
        routing: RoutingConfig,
        registry: OperatorRegistry,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            routing,
            registry,
        }
    }

    /// Give the operators back, e.g. to reuse them for the next cycle.
    pub fn into_registry(self) -> OperatorRegistry {
        self.registry
    }

    /// Run one dispatch cycle.
    pub fn update(&mut self) -> Result<UpdateReport> {
        tracing::info!(
            path = %self.source_dir.display(),
            entries = self.routing.len(),
            "Applying routing config"
        );

        match &self.routing {
            RoutingConfig::DirectCopy(entries) => copy_entries(&self.source_dir, entries),
            RoutingConfig::TaskRouting(entries) => dispatch_tasks(entries, &mut self.registry),
        }
    }
}

impl std::fmt::Debug for Updater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Updater")
            .field("source_dir", &self.source_dir)
            .field("routing", &self.routing)
            .field("registry", &self.registry)
            .finish()
    }
}

/// Submit every task, then run each touched operator once.
///
/// Names are resolved up front so an unknown operator fails the cycle
/// before any operator is called.
fn dispatch_tasks(entries: &[TaskEntry], registry: &mut OperatorRegistry) -> Result<UpdateReport> {
    let mut plan = Vec::new();
    for entry in entries {
        for task in &entry.tasks {
            let position = registry.resolve(&task.name)?;
            plan.push((position, entry, task));
        }
    }

    let mut report = UpdateReport::default();
    let mut touched = BTreeSet::new();

    for (position, entry, task) in plan {
        let operator = registry.operator_mut(position);
        tracing::debug!(
            operator = %task.name,
            file = %entry.file_name(),
            args = ?task.args,
            "Submitting task"
        );

        // The failing operator may hold a partial queue as well
        touched.insert(position);

        if let Err(source) = operator.submit_task(entry.file_name(), &task.args) {
            discard_all(registry, touched.iter().copied());
            return Err(Error::SubmitFailed {
                operator: task.name.clone(),
                file: entry.source.clone(),
                source,
            });
        }

        report.submitted += 1;
    }

    // BTreeSet iteration yields registration order
    let order: Vec<usize> = touched.into_iter().collect();
    for (done, &position) in order.iter().enumerate() {
        let operator = registry.operator_mut(position);
        let name = operator.name().to_string();
        tracing::info!(operator = %name, "Running operator");

        if let Err(source) = operator.run() {
            discard_all(registry, order[done + 1..].iter().copied());
            return Err(Error::OperatorFailed {
                operator: name,
                source,
            });
        }

        report.operators_run.push(name);
    }

    Ok(report)
}

/// Drop the queues of operators whose `run` will not happen this cycle.
fn discard_all(registry: &mut OperatorRegistry, positions: impl IntoIterator<Item = usize>) {
    for position in positions {
        let operator = registry.operator_mut(position);
        tracing::debug!(operator = %operator.name(), "Discarding queued tasks");
        operator.discard();
    }
}
