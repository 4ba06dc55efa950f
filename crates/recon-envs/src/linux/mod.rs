//! Linux host back-end
//!
//! [`LinuxEnv`] observes a host through a fixed set of queries and applies
//! literal shell [`Command`]s. Only the namespaces it knows how to
//! introspect can be probed:
//!
//! | Namespace  | Query                  | Observed state               |
//! |------------|------------------------|------------------------------|
//! | `packages` | [`PACKAGE_QUERY`]      | `{packages: [names, sorted]}` |
//! | `network`  | [`HOSTNAME_QUERY`]     | `{hostname: "<name>"}`       |

mod components;
mod shell;

pub use components::{AIDER, Aider, NETWORK, Network, ROOTS};
pub use shell::{Shell, SystemShell};

use std::fmt;

use recon_core::{Environment, Error, Result, Subconfig};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lists installed package names, one per line
pub const PACKAGE_QUERY: &str = "rpm -qa --queryformat '%{NAME}\\n'";

/// Prints the current hostname
pub const HOSTNAME_QUERY: &str = "hostname";

/// Installs the package named after it
pub const INSTALL_COMMAND: &str = "dnf install -y";

/// Sets the hostname named after it
pub const SET_HOSTNAME_COMMAND: &str = "hostnamectl set-hostname";

/// A shell command line, executed verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Command(String);

impl Command {
    pub fn new(line: impl Into<String>) -> Self {
        Self(line.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A Linux host reached through a [`Shell`].
pub struct LinuxEnv {
    shell: Box<dyn Shell>,
}

impl LinuxEnv {
    /// Environment for the local host
    pub fn new() -> Self {
        Self::with_shell(SystemShell)
    }

    /// Environment running its queries and commands through `shell`
    pub fn with_shell(shell: impl Shell + 'static) -> Self {
        Self {
            shell: Box::new(shell),
        }
    }

    fn installed_packages(&self) -> Result<Subconfig> {
        let mut names: Vec<String> = self
            .shell
            .run(PACKAGE_QUERY)?
            .into_iter()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();
        names.sort();
        names.dedup();
        Ok(Subconfig::from_pairs([("packages", Value::from(names))]))
    }

    fn hostname(&self) -> Result<Subconfig> {
        let lines = self.shell.run(HOSTNAME_QUERY)?;
        match lines.first().map(|line| line.trim()) {
            Some(name) if !name.is_empty() => {
                Ok(Subconfig::from_pairs([("hostname", Value::from(name))]))
            }
            _ => Ok(Subconfig::new()),
        }
    }
}

impl Default for LinuxEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for LinuxEnv {
    type Action = Command;

    fn probe(&self, namespace: &str) -> Result<Subconfig> {
        match namespace {
            "packages" => self.installed_packages(),
            "network" => self.hostname(),
            other => Err(Error::unknown_namespace(other)),
        }
    }

    fn apply(&mut self, actions: &[Command]) -> Result<()> {
        for action in actions {
            tracing::info!(command = %action, "Running");
            self.shell.run(action.as_str())?;
        }
        Ok(())
    }
}
