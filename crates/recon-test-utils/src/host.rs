//! [`FakeHost`]: a [`Shell`] that simulates the commands `LinuxEnv` issues.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashSet};
use std::rc::Rc;

use recon_core::{Error, Result};
use recon_envs::linux::{
    HOSTNAME_QUERY, INSTALL_COMMAND, PACKAGE_QUERY, SET_HOSTNAME_COMMAND, Shell,
};

#[derive(Debug, Default)]
struct HostState {
    packages: BTreeSet<String>,
    hostname: Option<String>,
    failing: HashSet<String>,
    executed: Vec<String>,
}

/// Simulated Linux host.
///
/// Clones share state, so a test can keep a handle after moving one into
/// a `LinuxEnv`:
///
/// ```rust,ignore
/// let host = FakeHost::new().with_packages(&["git"]);
/// let mut env = LinuxEnv::with_shell(host.clone());
/// // ... run ...
/// assert_eq!(host.executed(), vec!["dnf install -y curl"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FakeHost {
    state: Rc<RefCell<HostState>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_packages(self, packages: &[&str]) -> Self {
        self.state
            .borrow_mut()
            .packages
            .extend(packages.iter().map(|p| p.to_string()));
        self
    }

    pub fn with_hostname(self, hostname: &str) -> Self {
        self.state.borrow_mut().hostname = Some(hostname.to_string());
        self
    }

    /// Make `command` exit unsuccessfully.
    pub fn failing(self, command: &str) -> Self {
        self.state.borrow_mut().failing.insert(command.to_string());
        self
    }

    pub fn packages(&self) -> Vec<String> {
        self.state.borrow().packages.iter().cloned().collect()
    }

    pub fn hostname(&self) -> Option<String> {
        self.state.borrow().hostname.clone()
    }

    /// Every command line run so far, queries included.
    pub fn executed(&self) -> Vec<String> {
        self.state.borrow().executed.clone()
    }

    /// Commands run so far, excluding the read-only queries.
    pub fn changes(&self) -> Vec<String> {
        self.executed()
            .into_iter()
            .filter(|c| c != PACKAGE_QUERY && c != HOSTNAME_QUERY)
            .collect()
    }
}

impl Shell for FakeHost {
    fn run(&self, command: &str) -> Result<Vec<String>> {
        let mut state = self.state.borrow_mut();
        state.executed.push(command.to_string());

        if state.failing.contains(command) {
            return Err(Error::action_failed(command, "exit code 1: simulated failure"));
        }

        if command == PACKAGE_QUERY {
            return Ok(state.packages.iter().cloned().collect());
        }
        if command == HOSTNAME_QUERY {
            return Ok(state.hostname.iter().cloned().collect());
        }
        if let Some(package) = command.strip_prefix(INSTALL_COMMAND) {
            state.packages.insert(package.trim().to_string());
            return Ok(Vec::new());
        }
        if let Some(name) = command.strip_prefix(SET_HOSTNAME_COMMAND) {
            state.hostname = Some(name.trim().to_string());
            return Ok(Vec::new());
        }

        Err(Error::action_failed(command, "exit code 127: command not found"))
    }
}
