//! Execution of the external media tool.
//!
//! Everything the crate asks of `ffmpeg` goes through the [`ToolRunner`]
//! trait: it takes a prepared argument list, runs the tool to completion and
//! hands back the exit status together with the captured text streams.
//! [`ProcessRunner`] is the real implementation; tests and embedders can
//! substitute their own.

use std::ffi::{OsStr, OsString};
use std::process::{Command, Stdio};

#[cfg(windows)]
use std::os::windows::process::CommandExt;

use crate::error::VidframeError;

/// Windows flag that keeps child processes from opening a console window.
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Name of the tool looked up on `PATH` when no explicit program is set.
pub const DEFAULT_PROGRAM: &str = "ffmpeg";

/// Captured result of one tool invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Whether the process exited successfully.
    pub success: bool,
    /// The exit code, if the process exited normally.
    pub exit_code: Option<i32>,
    /// Everything the tool wrote to standard output.
    pub stdout: String,
    /// Everything the tool wrote to its diagnostic stream.
    pub stderr: String,
}

/// Runs the external tool synchronously.
///
/// Implementations must be [`Send`] and [`Sync`] because a runner is shared
/// with the background worker thread of an extraction.
///
/// Only a failure to *start* the tool is an `Err`. A tool that runs and
/// exits unsuccessfully yields `Ok` with [`ToolOutput::success`] unset, and
/// the caller decides what that means.
pub trait ToolRunner: Send + Sync {
    /// Run the tool with `args` (not including the program name).
    fn run(&self, args: &[OsString]) -> Result<ToolOutput, VidframeError>;

    /// The program this runner invokes, for messages.
    fn program(&self) -> &OsStr;
}

/// Runs the real tool as a child process.
///
/// Standard input is closed so the tool can never stop to ask a question
/// (for example whether to overwrite an existing file); it fails instead.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: OsString,
}

impl ProcessRunner {
    /// Run `ffmpeg` from `PATH`.
    pub fn new() -> Self {
        Self::with_program(DEFAULT_PROGRAM)
    }

    /// Run a specific executable.
    pub fn with_program<S: Into<OsString>>(program: S) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRunner for ProcessRunner {
    fn run(&self, args: &[OsString]) -> Result<ToolOutput, VidframeError> {
        let output = hidden_command(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|error| VidframeError::ToolSpawn {
                program: self.program.to_string_lossy().into_owned(),
                reason: error.to_string(),
            })?;

        Ok(ToolOutput {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn program(&self) -> &OsStr {
        &self.program
    }
}

/// Create a [`Command`] that won't spawn a visible console window on Windows.
pub(crate) fn hidden_command<S: AsRef<OsStr>>(program: S) -> Command {
    #[allow(unused_mut)]
    let mut command = Command::new(program);
    #[cfg(windows)]
    command.creation_flags(CREATE_NO_WINDOW);
    command
}
