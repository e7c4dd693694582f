//! Invocation of the external synchronization command.
//!
//! The engine only needs to hand a shell command string to the platform
//! shell and await its exit; producing that command (package-manager agent
//! detection, argument assembly) is the caller's concern. The trait seam
//! exists so tests can observe the guarded span without spawning processes.

use std::io;
use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;

/// Failures while executing the synchronization command.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyncError {
    /// The command could not be launched at all.
    #[error("failed to launch command: {0}")]
    Spawn(#[from] io::Error),

    /// The command ran and exited with a non-zero code.
    #[error("command exited with code {code}")]
    Exit {
        /// The process exit code.
        code: i32,
    },

    /// The command was terminated without reporting an exit code.
    #[error("command terminated without an exit code")]
    Terminated,
}

/// Executes the synchronization command for a patch cycle.
pub trait SyncRunner {
    /// Runs `command` to completion, blocking the cycle until it exits.
    ///
    /// # Errors
    ///
    /// Returns a [`SyncError`] when the command cannot be launched or exits
    /// unsuccessfully.
    fn run(&self, command: &str) -> Result<(), SyncError>;
}

/// Production runner: executes the command through the platform shell,
/// inheriting stdio so the command's own output reaches the terminal.
#[derive(Debug, Default, Clone)]
pub struct ShellSyncRunner {
    cwd: Option<PathBuf>,
}

impl ShellSyncRunner {
    /// Creates a runner that executes in the calling process's working
    /// directory.
    #[must_use]
    pub const fn new() -> Self {
        Self { cwd: None }
    }

    /// Creates a runner that executes in `dir`, typically the project
    /// directory the configuration file lives in.
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(dir.into()),
        }
    }
}

impl SyncRunner for ShellSyncRunner {
    fn run(&self, command: &str) -> Result<(), SyncError> {
        let mut shell = shell_command(command);
        if let Some(dir) = &self.cwd {
            shell.current_dir(dir);
        }
        let status = shell.status()?;
        if status.success() {
            return Ok(());
        }
        status
            .code()
            .map_or(Err(SyncError::Terminated), |code| {
                Err(SyncError::Exit { code })
            })
    }
}

#[cfg(unix)]
fn shell_command(command: &str) -> Command {
    let mut shell = Command::new("sh");
    shell.arg("-c").arg(command);
    shell
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut shell = Command::new("cmd");
    shell.arg("/C").arg(command);
    shell
}
