use std::process::{Command, Stdio};

use log::{debug, warn};

use crate::error::{Error, Result};

/// Runs a rendered command line and hands back its standard output.
pub trait CommandRunner {
    /// Executes `command_line` synchronously.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SubProcessExit`] if the command exits with a non-zero
    /// status, or [`Error::SubProcess`] if it could not be started.
    fn run(&self, command_line: &str) -> Result<String>;
}

/// Executes command lines through `<shell> -c`.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
}

impl ShellRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command_line: &str) -> Result<String> {
        debug!("Executing `{command_line}` with {}", self.shell);

        let output = Command::new(&self.shell)
            .args(["-c", command_line])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(Error::sub_process_exit(
                command_line.to_string(),
                output.status.code(),
                stderr,
            ));
        }

        if !stderr.trim().is_empty() {
            warn!("`{command_line}` wrote to stderr: {}", stderr.trim_end());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
