//! Recording operator fixture.

use std::sync::{Arc, Mutex};

use confsync_updater::{Operator, OperatorResult};

/// One call the dispatcher made on an operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorCall {
    Submit { file: String, args: Vec<String> },
    Run,
    Discard,
}

/// Call log shared between any number of [`RecordingOperator`]s, in the
/// order the calls happened.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<(String, OperatorCall)>>>,
    executed: Arc<Mutex<Vec<(String, String)>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, operator: &str, call: OperatorCall) {
        self.entries
            .lock()
            .expect("CallLog: poisoned")
            .push((operator.to_string(), call));
    }

    /// Every recorded call, tagged with the operator name.
    pub fn all(&self) -> Vec<(String, OperatorCall)> {
        self.entries.lock().expect("CallLog: poisoned").clone()
    }

    /// Calls made on the named operator.
    pub fn calls_for(&self, operator: &str) -> Vec<OperatorCall> {
        self.all()
            .into_iter()
            .filter(|(name, _)| name == operator)
            .map(|(_, call)| call)
            .collect()
    }

    /// Submissions made on the named operator as `(file, args)` pairs.
    pub fn submissions_for(&self, operator: &str) -> Vec<(String, Vec<String>)> {
        self.calls_for(operator)
            .into_iter()
            .filter_map(|call| match call {
                OperatorCall::Submit { file, args } => Some((file, args)),
                OperatorCall::Run | OperatorCall::Discard => None,
            })
            .collect()
    }

    /// Number of `run` calls on the named operator.
    pub fn run_count(&self, operator: &str) -> usize {
        self.calls_for(operator)
            .iter()
            .filter(|call| **call == OperatorCall::Run)
            .count()
    }

    /// Files the named operator actually executed, across all its runs.
    pub fn executed_for(&self, operator: &str) -> Vec<String> {
        self.executed
            .lock()
            .expect("CallLog: poisoned")
            .iter()
            .filter(|(name, _)| name == operator)
            .map(|(_, file)| file.clone())
            .collect()
    }

    fn record_executed(&self, operator: &str, files: Vec<String>) {
        let mut executed = self.executed.lock().expect("CallLog: poisoned");
        executed.extend(files.into_iter().map(|file| (operator.to_string(), file)));
    }

    /// Operator names in the order their `run` was called.
    pub fn run_order(&self) -> Vec<String> {
        self.all()
            .into_iter()
            .filter(|(_, call)| *call == OperatorCall::Run)
            .map(|(name, _)| name)
            .collect()
    }
}

/// An [`Operator`] that records every call and can be told to fail.
///
/// Submitted files are queued like a real operator would; `run` moves the
/// queue into [`CallLog::executed_for`] and `discard` empties it.
pub struct RecordingOperator {
    name: String,
    log: CallLog,
    queue: Vec<String>,
    fail_submit: bool,
    fail_run: bool,
}

impl RecordingOperator {
    pub fn new(name: impl Into<String>, log: &CallLog) -> Self {
        Self {
            name: name.into(),
            log: log.clone(),
            queue: Vec::new(),
            fail_submit: false,
            fail_run: false,
        }
    }

    /// Make every `submit_task` fail (after recording it).
    pub fn failing_submit(mut self) -> Self {
        self.fail_submit = true;
        self
    }

    /// Make `run` fail (after recording it).
    pub fn failing_run(mut self) -> Self {
        self.fail_run = true;
        self
    }

    /// Box the operator for an operator list.
    pub fn boxed(self) -> Box<dyn Operator> {
        Box::new(self)
    }
}

impl Operator for RecordingOperator {
    fn name(&self) -> &str {
        &self.name
    }

    fn submit_task(&mut self, file_name: &str, args: &[String]) -> OperatorResult {
        self.log.record(
            &self.name,
            OperatorCall::Submit {
                file: file_name.to_string(),
                args: args.to_vec(),
            },
        );
        if self.fail_submit {
            return Err(format!("{} rejected {}", self.name, file_name).into());
        }
        self.queue.push(file_name.to_string());
        Ok(())
    }

    fn run(&mut self) -> OperatorResult {
        self.log.record(&self.name, OperatorCall::Run);
        let queued = std::mem::take(&mut self.queue);
        if self.fail_run {
            return Err(format!("{} failed to run", self.name).into());
        }
        self.log.record_executed(&self.name, queued);
        Ok(())
    }

    fn discard(&mut self) {
        self.log.record(&self.name, OperatorCall::Discard);
        self.queue.clear();
    }
}
