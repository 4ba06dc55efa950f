//! Ordered key/value state fragments
//!
//! A [`Subconfig`] describes one namespace, either as desired state (a slice
//! of the loaded configuration) or as observed state (what an environment
//! reports). Diffing the two is the heart of reconciliation:
//!
//! ```
//! use recon_core::Subconfig;
//! use serde_json::json;
//!
//! let desired = Subconfig::from_pairs([("hostname", json!("web1")), ("domain", json!("lan"))]);
//! let observed = Subconfig::from_pairs([("domain", json!("lan")), ("motd", json!("hi"))]);
//!
//! let delta = desired.difference(&observed);
//! assert_eq!(delta.keys().collect::<Vec<_>>(), vec!["hostname"]);
//! ```

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An insertion-ordered mapping from key to value.
///
/// Keys are unique. A `Subconfig` is never mutated after construction;
/// [`difference`](Subconfig::difference) and [`union`](Subconfig::union)
/// return new instances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Subconfig {
    entries: Map<String, Value>,
}

impl Subconfig {
    /// Create an empty subconfig
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a subconfig from `(key, value)` pairs, last occurrence wins
    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
    }

    /// Entries of `self` whose key is absent from `other`, or present there
    /// with a different value.
    ///
    /// Not symmetric. Keys only present in `other` never appear in the
    /// result. Iteration order follows `self`.
    pub fn difference(&self, other: &Subconfig) -> Subconfig {
        self.entries
            .iter()
            .filter(|(key, value)| other.get(key) != Some(*value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Right-biased merge: values from `other` win on key collision.
    ///
    /// Keys already in `self` keep their position; keys new in `other`
    /// are appended in `other`'s order.
    pub fn union(&self, other: &Subconfig) -> Subconfig {
        let mut entries = self.entries.clone();
        for (key, value) in &other.entries {
            entries.insert(key.clone(), value.clone());
        }
        Subconfig { entries }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Borrow the underlying JSON object
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.entries
    }

    /// Convert into a JSON object value
    pub fn to_json(&self) -> Value {
        Value::Object(self.entries.clone())
    }
}

impl From<Map<String, Value>> for Subconfig {
    fn from(entries: Map<String, Value>) -> Self {
        Self { entries }
    }
}

impl FromIterator<(String, Value)> for Subconfig {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Subconfig {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Sub for &Subconfig {
    type Output = Subconfig;

    fn sub(self, other: &Subconfig) -> Subconfig {
        self.difference(other)
    }
}

impl Add for &Subconfig {
    type Output = Subconfig;

    fn add(self, other: &Subconfig) -> Subconfig {
        self.union(other)
    }
}
