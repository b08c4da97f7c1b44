//! Subprocess execution utilities.
//!
//! Hooks talk to external formatters through the [`CommandRunner`] trait so
//! that tests can script the tool's answers instead of launching real binaries.

use anyhow::{Context, Result};
use std::process::Output;

/// Result of a command execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    /// Exit code (None if killed by signal)
    pub exit_code: Option<i32>,
    /// Standard output (standard error is merged in)
    pub stdout: String,
    /// Standard error
    pub stderr: String,
    /// Whether the command succeeded (exit code 0)
    pub success: bool,
}

impl CommandResult {
    /// Create from std::process::Output.
    pub fn from_output(output: Output) -> Self {
        Self {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        }
    }

    /// Successful result with the given output.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
            success: true,
        }
    }

    /// Failed result with the given exit code and output.
    pub fn failed(code: i32, stdout: impl Into<String>) -> Self {
        Self {
            exit_code: Some(code),
            stdout: stdout.into(),
            stderr: String::new(),
            success: false,
        }
    }

    /// Everything the process printed, stdout first.
    pub fn combined_output(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}{}", self.stdout, self.stderr)
        }
    }
}

/// Capability to launch external programs.
///
/// A non-zero exit status is reported through [`CommandResult`], never as an
/// error. `Err` means the process could not be started at all.
pub trait CommandRunner {
    /// Run `program` with `args`, capturing stdout and stderr together.
    fn run(&self, program: &str, args: &[String]) -> Result<CommandResult>;

    /// Run a single command line through the platform shell.
    fn run_shell(&self, cmd: &str) -> Result<CommandResult>;

    /// Whether `program` can be found on the execution path.
    fn is_available(&self, program: &str) -> bool;
}

/// Runner that launches real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<CommandResult> {
        let output = duct::cmd(program, args)
            .stderr_to_stdout()
            .stdout_capture()
            .unchecked()
            .run()
            .with_context(|| format!("Failed to execute command: {} {}", program, args.join(" ")))?;

        Ok(CommandResult::from_output(output))
    }

    fn run_shell(&self, cmd: &str) -> Result<CommandResult> {
        let expression = if cfg!(target_os = "windows") {
            duct::cmd!("cmd", "/C", cmd)
        } else {
            duct::cmd!("sh", "-c", cmd)
        };

        let output = expression
            .stderr_to_stdout()
            .stdout_capture()
            .unchecked()
            .run()
            .with_context(|| format!("Failed to execute command: {}", cmd))?;

        Ok(CommandResult::from_output(output))
    }

    fn is_available(&self, program: &str) -> bool {
        command_exists(program)
    }
}

/// Run a shell command and return the result.
pub fn run_command(cmd: &str) -> Result<CommandResult> {
    SystemRunner.run_shell(cmd)
}

/// Check if a command exists in PATH.
pub fn command_exists(cmd: &str) -> bool {
    which::which(cmd).is_ok()
}
