//! Components that translate configuration into host commands

use std::collections::HashSet;
use std::sync::Arc;

use recon_core::{Component, ComponentType, Config, Environment, Error, Result, Subconfig, diff};
use serde_json::Value;

use super::{Command, INSTALL_COMMAND, LinuxEnv, SET_HOSTNAME_COMMAND};

/// Host network identity. Understands `hostname` only.
pub struct Network {
    config: Arc<Config>,
}

impl Network {
    pub const NAMESPACE: &'static str = "network";

    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    fn to_command(key: &str, value: &Value) -> Result<Command> {
        match key {
            "hostname" => {
                let name = string_value(Self::NAMESPACE, key, value)?;
                Ok(Command::new(format!("{} {}", SET_HOSTNAME_COMMAND, name)))
            }
            _ => Err(Error::InvalidKey {
                namespace: Self::NAMESPACE.to_string(),
                key: key.to_string(),
            }),
        }
    }
}

impl Component<LinuxEnv> for Network {
    fn namespace(&self) -> &str {
        Self::NAMESPACE
    }

    fn subconfig(&self) -> Result<Subconfig> {
        self.config.require(Self::NAMESPACE).cloned()
    }

    fn probe(&self, env: &LinuxEnv) -> Result<Vec<Command>> {
        let desired = self.subconfig()?;
        diff::plan(Self::NAMESPACE, &desired, env, Self::to_command)
    }
}

/// Packages the aider tooling needs installed.
///
/// Reads a `packages` list from its slice and installs whatever the
/// `packages` namespace does not report, in configured order.
pub struct Aider {
    config: Arc<Config>,
}

impl Aider {
    pub const NAMESPACE: &'static str = "aider";

    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

impl Component<LinuxEnv> for Aider {
    fn namespace(&self) -> &str {
        Self::NAMESPACE
    }

    fn subconfig(&self) -> Result<Subconfig> {
        self.config.require(Self::NAMESPACE).cloned()
    }

    fn probe(&self, env: &LinuxEnv) -> Result<Vec<Command>> {
        let desired = self.subconfig()?;
        let observed = env.probe("packages")?;

        let wanted = package_list(Self::NAMESPACE, &desired)?;
        let mut installed: HashSet<String> =
            package_list("packages", &observed)?.into_iter().collect();

        let commands: Vec<Command> = wanted
            .into_iter()
            .filter(|pkg| installed.insert(pkg.clone()))
            .map(|pkg| Command::new(format!("{} {}", INSTALL_COMMAND, pkg)))
            .collect();

        tracing::debug!(count = commands.len(), "Packages to install");
        Ok(commands)
    }
}

/// The `packages` entry of a subconfig as a list of names; absent is empty.
fn package_list(namespace: &str, subconfig: &Subconfig) -> Result<Vec<String>> {
    let Some(value) = subconfig.get("packages") else {
        return Ok(Vec::new());
    };
    let invalid = || Error::InvalidValue {
        namespace: namespace.to_string(),
        key: "packages".to_string(),
        reason: "expected a list of package names".to_string(),
    };

    value
        .as_array()
        .ok_or_else(invalid)?
        .iter()
        .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
        .collect()
}

/// The string form of `value`. Hosts report these keys as text, so any
/// other type would never compare equal to the observed state.
fn string_value(namespace: &str, key: &str, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidValue {
            namespace: namespace.to_string(),
            key: key.to_string(),
            reason: format!("expected a string, found {}", value),
        })
}

fn build_network(config: Arc<Config>) -> Box<dyn Component<LinuxEnv>> {
    Box::new(Network::new(config))
}

fn build_aider(config: Arc<Config>) -> Box<dyn Component<LinuxEnv>> {
    Box::new(Aider::new(config))
}

pub static NETWORK: ComponentType<LinuxEnv> = ComponentType {
    name: Network::NAMESPACE,
    dependencies: &[],
    build: build_network,
};

pub static AIDER: ComponentType<LinuxEnv> = ComponentType {
    name: Aider::NAMESPACE,
    dependencies: &[],
    build: build_aider,
};

/// Root components of the Linux application
pub static ROOTS: &[&ComponentType<LinuxEnv>] = &[&NETWORK, &AIDER];
