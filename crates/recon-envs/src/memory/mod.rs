//! In-memory simulation back-end
//!
//! [`MemoryEnv`] keeps one ordered key/value map per namespace and applies
//! [`SetAction`]s to it. It is the back-end used for demos and for checking
//! what a configuration would do without touching a host.

mod action;
mod components;

pub use action::SetAction;
pub use components::{DesiredState, NETWORK, ROOTS, SSHD};

use std::collections::{BTreeMap, BTreeSet};

use recon_core::{Environment, Error, Result, Subconfig};
use serde_json::{Map, Value};

/// Simulated environment state.
///
/// Namespaces that were never written probe as empty, unless the
/// environment was created with [`strict`](MemoryEnv::strict).
#[derive(Debug, Clone, Default)]
pub struct MemoryEnv {
    state: BTreeMap<String, Map<String, Value>>,
    known: Option<BTreeSet<String>>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recognise only `namespaces`; probing or writing anything else fails
    pub fn strict<I, S>(namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            state: BTreeMap::new(),
            known: Some(namespaces.into_iter().map(Into::into).collect()),
        }
    }

    /// Merge `observed` into a namespace's state before a run
    pub fn seed(&mut self, namespace: &str, observed: &Subconfig) -> Result<()> {
        self.check_known(namespace)?;
        let entry = self.state.entry(namespace.to_string()).or_default();
        for (key, value) in observed.iter() {
            entry.insert(key.to_string(), value.clone());
        }
        Ok(())
    }

    /// Current state of a namespace
    pub fn state(&self, namespace: &str) -> Subconfig {
        self.state
            .get(namespace)
            .cloned()
            .map(Subconfig::from)
            .unwrap_or_default()
    }

    /// Namespaces holding state, sorted
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.state.keys().map(String::as_str)
    }

    /// Apply actions given in their `namespace:key:value` text form
    ///
    /// Every action is decoded before any is applied. Values arrive as
    /// strings; see [`SetAction::encode`].
    pub fn apply_encoded(&mut self, actions: &[&str]) -> Result<()> {
        let decoded = actions
            .iter()
            .map(|text| text.parse::<SetAction>())
            .collect::<Result<Vec<_>>>()?;
        self.apply(&decoded)
    }

    /// Whole state as a JSON object of namespace objects
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.state
                .iter()
                .map(|(ns, entries)| (ns.clone(), Value::Object(entries.clone())))
                .collect(),
        )
    }

    fn check_known(&self, namespace: &str) -> Result<()> {
        match &self.known {
            Some(known) if !known.contains(namespace) => Err(Error::unknown_namespace(namespace)),
            _ => Ok(()),
        }
    }
}

impl Environment for MemoryEnv {
    type Action = SetAction;

    fn probe(&self, namespace: &str) -> Result<Subconfig> {
        self.check_known(namespace)?;
        Ok(self.state(namespace))
    }

    fn apply(&mut self, actions: &[SetAction]) -> Result<()> {
        for action in actions {
            self.check_known(&action.namespace)?;
            tracing::debug!(%action, "Setting");
            self.state
                .entry(action.namespace.clone())
                .or_default()
                .insert(action.key.clone(), action.value.clone());
        }
        Ok(())
    }
}
