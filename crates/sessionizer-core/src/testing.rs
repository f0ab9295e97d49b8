//! Scripted [`CommandRunner`] for tests: records calls, replays queued outputs.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;

use crate::process::{CommandRunner, Invocation, ProcessOutput};

/// One invocation observed by [`FakeRunner`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub invocation: Invocation,
    pub stdin: Option<String>,
    pub interactive: bool,
}

/// Replays queued outputs in call order; once the queue is empty every call succeeds
#[derive(Debug, Default)]
pub struct FakeRunner {
    outputs: RefCell<VecDeque<ProcessOutput>>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outputs(outputs: impl IntoIterator<Item = ProcessOutput>) -> Self {
        Self {
            outputs: RefCell::new(outputs.into_iter().collect()),
            calls: RefCell::default(),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// Rendered command lines of every call so far
    pub fn commands(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|c| c.invocation.to_string())
            .collect()
    }

    fn next_output(
        &self,
        invocation: &Invocation,
        stdin: Option<&str>,
        interactive: bool,
    ) -> ProcessOutput {
        self.calls.borrow_mut().push(RecordedCall {
            invocation: invocation.clone(),
            stdin: stdin.map(str::to_string),
            interactive,
        });
        self.outputs
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| ProcessOutput::ok(""))
    }
}

impl CommandRunner for FakeRunner {
    fn output(&self, invocation: &Invocation, stdin: Option<&str>) -> io::Result<ProcessOutput> {
        Ok(self.next_output(invocation, stdin, false))
    }

    fn interactive(&self, invocation: &Invocation) -> io::Result<Option<i32>> {
        Ok(self.next_output(invocation, None, true).code)
    }
}
