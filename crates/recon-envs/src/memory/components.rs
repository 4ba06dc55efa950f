//! Key/value components for the in-memory back-end

use std::sync::Arc;

use recon_core::{Component, ComponentType, Config, Result, Subconfig, diff};

use super::{MemoryEnv, SetAction};

/// Converges one namespace to its configuration slice, one [`SetAction`]
/// per missing or differing key. An unconfigured namespace wants nothing.
pub struct DesiredState {
    namespace: &'static str,
    config: Arc<Config>,
}

impl DesiredState {
    pub fn new(namespace: &'static str, config: Arc<Config>) -> Self {
        Self { namespace, config }
    }
}

impl Component<MemoryEnv> for DesiredState {
    fn namespace(&self) -> &str {
        self.namespace
    }

    fn subconfig(&self) -> Result<Subconfig> {
        Ok(self.config.slice(self.namespace))
    }

    fn probe(&self, env: &MemoryEnv) -> Result<Vec<SetAction>> {
        let desired = self.subconfig()?;
        diff::plan(self.namespace, &desired, env, |key, value| {
            Ok(SetAction::new(self.namespace, key, value.clone()))
        })
    }
}

fn build_network(config: Arc<Config>) -> Box<dyn Component<MemoryEnv>> {
    Box::new(DesiredState::new("network", config))
}

fn build_sshd(config: Arc<Config>) -> Box<dyn Component<MemoryEnv>> {
    Box::new(DesiredState::new("sshd", config))
}

/// Network settings; no dependencies
pub static NETWORK: ComponentType<MemoryEnv> = ComponentType {
    name: "network",
    dependencies: &[],
    build: build_network,
};

/// SSH daemon settings; needs the network configured first
pub static SSHD: ComponentType<MemoryEnv> = ComponentType {
    name: "sshd",
    dependencies: &[&NETWORK],
    build: build_sshd,
};

/// Root components of the in-memory application
pub static ROOTS: &[&ComponentType<MemoryEnv>] = &[&SSHD];
