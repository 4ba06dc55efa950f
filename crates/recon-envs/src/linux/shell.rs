//! Shell execution seam for the Linux back-end

use std::process::Command as Process;

use recon_core::{Error, Result};

/// Runs a command line and returns its standard output as lines.
pub trait Shell {
    /// # Errors
    ///
    /// Returns [`Error::ActionFailed`] when the command exits unsuccessfully.
    fn run(&self, command: &str) -> Result<Vec<String>>;
}

/// Executes commands through `sh -c` on the local host.
///
/// Commands run verbatim; nothing is escaped or sandboxed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemShell;

impl Shell for SystemShell {
    fn run(&self, command: &str) -> Result<Vec<String>> {
        let output = Process::new("sh").arg("-c").arg(command).output()?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout)
                .lines()
                .map(str::to_string)
                .collect())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let code = output.status.code().unwrap_or(-1);
            Err(Error::action_failed(
                command,
                format!("exit code {}: {}", code, stderr.trim()),
            ))
        }
    }
}
