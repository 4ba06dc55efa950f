//! [`RecordingEnv`]: an in-memory environment that logs every call.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use recon_core::{Environment, Error, Result, Subconfig};
use serde_json::{Map, Value};

/// Set `key` to `value` in `namespace`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Write {
    pub namespace: String,
    pub key: String,
    pub value: Value,
}

impl Write {
    pub fn new(namespace: &str, key: &str, value: Value) -> Self {
        Self {
            namespace: namespace.to_string(),
            key: key.to_string(),
            value,
        }
    }
}

/// A recorded environment call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Probe(String),
    Apply(Vec<Write>),
}

/// Environment double for orchestration tests.
///
/// Probing an unseen namespace returns an empty subconfig unless the
/// environment was built with [`strict`](RecordingEnv::strict). Failures
/// can be injected per `(namespace, key)` with
/// [`failing_on`](RecordingEnv::failing_on).
#[derive(Debug, Default)]
pub struct RecordingEnv {
    state: BTreeMap<String, Map<String, Value>>,
    calls: RefCell<Vec<Call>>,
    known: Option<BTreeSet<String>>,
    fail_on: Option<(String, String)>,
}

impl RecordingEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only `namespaces` can be probed or written.
    pub fn strict(namespaces: &[&str]) -> Self {
        Self {
            known: Some(namespaces.iter().map(|s| s.to_string()).collect()),
            ..Self::default()
        }
    }

    /// Pre-populate observed state without recording a call.
    pub fn seed(mut self, namespace: &str, pairs: &[(&str, Value)]) -> Self {
        let entry = self.state.entry(namespace.to_string()).or_default();
        for (key, value) in pairs {
            entry.insert(key.to_string(), value.clone());
        }
        self
    }

    /// Fail when applying a write to `namespace.key`.
    pub fn failing_on(mut self, namespace: &str, key: &str) -> Self {
        self.fail_on = Some((namespace.to_string(), key.to_string()));
        self
    }

    /// Current state of a namespace.
    pub fn state(&self, namespace: &str) -> Subconfig {
        self.state
            .get(namespace)
            .cloned()
            .map(Subconfig::from)
            .unwrap_or_default()
    }

    /// Every call so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Batches passed to `apply`, in order.
    pub fn applies(&self) -> Vec<Vec<Write>> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Apply(writes) => Some(writes.clone()),
                Call::Probe(_) => None,
            })
            .collect()
    }

    /// Namespaces passed to `probe`, in order.
    pub fn probes(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Probe(ns) => Some(ns.clone()),
                Call::Apply(_) => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn check_known(&self, namespace: &str) -> Result<()> {
        match &self.known {
            Some(known) if !known.contains(namespace) => Err(Error::unknown_namespace(namespace)),
            _ => Ok(()),
        }
    }
}

impl Environment for RecordingEnv {
    type Action = Write;

    fn probe(&self, namespace: &str) -> Result<Subconfig> {
        self.calls
            .borrow_mut()
            .push(Call::Probe(namespace.to_string()));
        self.check_known(namespace)?;
        Ok(self.state(namespace))
    }

    fn apply(&mut self, actions: &[Write]) -> Result<()> {
        self.calls.borrow_mut().push(Call::Apply(actions.to_vec()));
        for write in actions {
            self.check_known(&write.namespace)?;
            if let Some((ns, key)) = &self.fail_on
                && *ns == write.namespace
                && *key == write.key
            {
                return Err(Error::action_failed(
                    format!("{}:{}", write.namespace, write.key),
                    "injected failure",
                ));
            }
            self.state
                .entry(write.namespace.clone())
                .or_default()
                .insert(write.key.clone(), write.value.clone());
        }
        Ok(())
    }
}
