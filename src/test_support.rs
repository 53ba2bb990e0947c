use crate::error::{ConncheckError, Result};
use crate::exec::{CapturedOutput, ExecResult, Invocation, Runner};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// Recording [`Runner`] for tests.
///
/// Only programs registered with [`FakeRunner::with_tool`] are "on PATH".
/// Every invocation is recorded; exit codes default to 0 unless scripted.
/// A code scripted for a full command line wins over one scripted for its
/// program.
#[derive(Default)]
pub(crate) struct FakeRunner {
    available: HashSet<String>,
    unstartable: HashSet<String>,
    exit_codes: HashMap<String, i32>,
    command_exit_codes: HashMap<String, i32>,
    stdout: HashMap<String, String>,
    calls: RefCell<Vec<Invocation>>,
}

impl FakeRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_tool(mut self, program: &str) -> Self {
        self.available.insert(program.to_string());
        self
    }

    pub(crate) fn with_exit_code(mut self, program: &str, code: i32) -> Self {
        self.exit_codes.insert(program.to_string(), code);
        self
    }

    pub(crate) fn with_command_exit_code(mut self, invocation: &Invocation, code: i32) -> Self {
        self.command_exit_codes
            .insert(invocation.command_line(), code);
        self
    }

    /// `program` is on PATH but fails to start, like a binary without the
    /// execute bit.
    pub(crate) fn with_spawn_failure(mut self, program: &str) -> Self {
        self.available.insert(program.to_string());
        self.unstartable.insert(program.to_string());
        self
    }

    pub(crate) fn with_stdout(mut self, program: &str, stdout: &str) -> Self {
        self.stdout.insert(program.to_string(), stdout.to_string());
        self
    }

    pub(crate) fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    pub(crate) fn programs_called(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|c| c.program.clone())
            .collect()
    }

    fn record(&self, invocation: &Invocation) -> Result<ExecResult> {
        self.calls.borrow_mut().push(invocation.clone());
        if !self.available.contains(&invocation.program) {
            return Err(ConncheckError::ProcessFailed(format!(
                "failed to execute '{}': not found",
                invocation.command_line()
            )));
        }
        if self.unstartable.contains(&invocation.program) {
            return Err(ConncheckError::ProcessFailed(format!(
                "failed to execute '{}': Permission denied",
                invocation.command_line()
            )));
        }
        let code = self
            .command_exit_codes
            .get(&invocation.command_line())
            .or_else(|| self.exit_codes.get(&invocation.program))
            .copied()
            .unwrap_or(0);
        Ok(ExecResult {
            program: invocation.program.clone(),
            exit_code: Some(code),
        })
    }
}

impl Runner for FakeRunner {
    fn is_available(&self, program: &str) -> bool {
        self.available.contains(program)
    }

    fn run(&self, invocation: &Invocation) -> Result<ExecResult> {
        self.record(invocation)
    }

    fn capture(&self, invocation: &Invocation) -> Result<CapturedOutput> {
        let result = self.record(invocation)?;
        Ok(CapturedOutput {
            result,
            stdout: self
                .stdout
                .get(&invocation.program)
                .cloned()
                .unwrap_or_default(),
            stderr: String::new(),
        })
    }
}

/// Collects console output written by an operation.
pub(crate) fn output_of(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap()
}
