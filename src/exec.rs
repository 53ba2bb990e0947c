//! External process runner for conncheck.
//!
//! All external tools are launched through the [`Runner`] trait with an
//! explicit program name and argument vector. Nothing goes through a shell,
//! so hosts typed by the user are never interpreted as shell syntax.

use crate::error::{ConncheckError, Result};
use std::process::{Command, Output, Stdio};

/// A program plus its argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Shell-quoted rendering, for display only.
    pub fn command_line(&self) -> String {
        let mut words = Vec::with_capacity(self.args.len() + 1);
        words.push(self.program.as_str());
        words.extend(self.args.iter().map(String::as_str));
        shell_words::join(words)
    }
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.command_line())
    }
}

/// Exit status of a finished external process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    /// Program that was run.
    pub program: String,
    /// Exit code (None if the process was terminated by a signal).
    pub exit_code: Option<i32>,
}

impl ExecResult {
    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Human-readable exit status, e.g. `exit code 2`.
    pub fn status_text(&self) -> String {
        match self.exit_code {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Captured output of a finished external process.
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    pub result: ExecResult,
    /// Standard output (trimmed).
    pub stdout: String,
    /// Standard error (trimmed).
    pub stderr: String,
}

impl CapturedOutput {
    fn from_output(program: &str, output: &Output) -> Self {
        Self {
            result: ExecResult {
                program: program.to_string(),
                exit_code: output.status.code(),
            },
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

/// Launches external programs and probes the search path.
pub trait Runner {
    /// Whether `program` resolves to an executable on the search path.
    fn is_available(&self, program: &str) -> bool;

    /// Run with inherited stdio and wait for completion.
    fn run(&self, invocation: &Invocation) -> Result<ExecResult>;

    /// Run with stdout/stderr captured and wait for completion.
    fn capture(&self, invocation: &Invocation) -> Result<CapturedOutput>;
}

/// [`Runner`] backed by the real operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn is_available(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }

    fn run(&self, invocation: &Invocation) -> Result<ExecResult> {
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| spawn_error(invocation, e))?;

        Ok(ExecResult {
            program: invocation.program.clone(),
            exit_code: status.code(),
        })
    }

    fn capture(&self, invocation: &Invocation) -> Result<CapturedOutput> {
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| spawn_error(invocation, e))?;

        Ok(CapturedOutput::from_output(&invocation.program, &output))
    }
}

fn spawn_error(invocation: &Invocation, e: std::io::Error) -> ConncheckError {
    ConncheckError::ProcessFailed(format!(
        "failed to execute '{}': {}\nFix: ensure {} is installed and in PATH.",
        invocation.command_line(),
        e,
        invocation.program
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_quotes_arguments() {
        let inv = Invocation::new("ping").args(["-c", "4"]).arg("my host");
        assert_eq!(inv.command_line(), "ping -c 4 'my host'");
    }

    #[test]
    fn exec_result_success_only_on_zero() {
        let ok = ExecResult {
            program: "ping".into(),
            exit_code: Some(0),
        };
        let failed = ExecResult {
            program: "ping".into(),
            exit_code: Some(1),
        };
        let killed = ExecResult {
            program: "ping".into(),
            exit_code: None,
        };
        assert!(ok.is_success());
        assert!(!failed.is_success());
        assert!(!killed.is_success());
        assert_eq!(failed.status_text(), "exit code 1");
        assert_eq!(killed.status_text(), "terminated by signal");
    }

    #[test]
    fn missing_program_is_not_available() {
        assert!(!SystemRunner.is_available("conncheck-definitely-not-a-real-tool"));
    }

    #[test]
    fn spawning_missing_program_is_process_error() {
        let inv = Invocation::new("conncheck-definitely-not-a-real-tool");
        let err = SystemRunner.run(&inv).unwrap_err();
        assert!(matches!(err, ConncheckError::ProcessFailed(_)));
    }

    #[cfg(unix)]
    #[test]
    fn capture_collects_stdout_and_exit_code() {
        let inv = Invocation::new("sh").args(["-c", "echo hello; exit 3"]);
        let out = SystemRunner.capture(&inv).unwrap();
        assert_eq!(out.stdout, "hello");
        assert_eq!(out.result.exit_code, Some(3));
    }
}
