//! Back-ends the CLI can drive

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use recon_core::{ComponentType, Environment};
use recon_envs::{LinuxEnv, MemoryEnv, linux, memory};

/// An environment back-end selectable with `--env`.
///
/// Ties an [`Environment`] to the root components of its application and
/// to how the CLI obtains a live instance of it.
pub trait Backend: Environment<Action: fmt::Display + Serialize> + Sized + 'static {
    /// Name shown in command output
    const NAME: &'static str;

    /// Top-level components of this back-end's application
    fn roots() -> &'static [&'static ComponentType<Self>];

    /// Obtain the environment to reconcile
    fn connect() -> Self;

    /// Full state dump, for back-ends that can produce one
    fn snapshot(&self) -> Option<Value> {
        None
    }
}

impl Backend for MemoryEnv {
    const NAME: &'static str = "memory";

    fn roots() -> &'static [&'static ComponentType<Self>] {
        memory::ROOTS
    }

    fn connect() -> Self {
        MemoryEnv::new()
    }

    fn snapshot(&self) -> Option<Value> {
        Some(self.to_json())
    }
}

impl Backend for LinuxEnv {
    const NAME: &'static str = "linux";

    fn roots() -> &'static [&'static ComponentType<Self>] {
        linux::ROOTS
    }

    fn connect() -> Self {
        LinuxEnv::new()
    }
}
