//! Operator trait for pluggable file handlers

/// Error type operators report failures with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result of an operator call.
pub type OperatorResult = std::result::Result<(), BoxError>;

/// A named handler that collects per-file tasks and executes them in one
/// batch.
///
/// During a dispatch cycle the [`Updater`](crate::Updater) calls
/// [`submit_task`](Operator::submit_task) once per routed task and then
/// [`run`](Operator::run) exactly once, and only if at least one task was
/// submitted. Both calls block until done. When the cycle fails before an
/// operator's `run`, [`discard`](Operator::discard) is called instead so
/// that nothing queued in the failed cycle leaks into the next one.
pub trait Operator {
    /// Stable, unique name that routing entries refer to.
    fn name(&self) -> &str;

    /// Queue work for `file_name` (the base name of the source file).
    ///
    /// Must not execute anything; execution belongs to [`run`](Operator::run).
    fn submit_task(&mut self, file_name: &str, args: &[String]) -> OperatorResult;

    /// Execute everything queued since the cycle began.
    fn run(&mut self) -> OperatorResult;

    /// Drop everything queued since the cycle began without executing it.
    fn discard(&mut self) {}
}
