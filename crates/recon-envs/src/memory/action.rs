//! Structured set actions and their colon-separated encoding

use std::fmt;
use std::str::FromStr;

use recon_core::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const SEPARATOR: char = ':';

/// Set `key` to `value` in `namespace`.
///
/// The structured form is authoritative. The `namespace:key:value` text
/// encoding exists for interop and only round-trips when no field contains
/// a colon; [`encode`](SetAction::encode) refuses anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetAction {
    pub namespace: String,
    pub key: String,
    pub value: Value,
}

impl SetAction {
    pub fn new(namespace: impl Into<String>, key: impl Into<String>, value: Value) -> Self {
        Self {
            namespace: namespace.into(),
            key: key.into(),
            value,
        }
    }

    /// Encode as `namespace:key:value`
    ///
    /// Strings are written raw, other values as JSON. Decoding yields a
    /// string value, so an encoded non-string value (`sshd:port:22`) is stored
    /// as `"22"` when replayed and never equals the desired `22`: an
    /// environment fed the text form does not converge on such keys.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedAction`] if any field contains `:`.
    pub fn encode(&self) -> Result<String> {
        let value = value_text(&self.value);
        for (field, text) in [
            ("namespace", self.namespace.as_str()),
            ("key", self.key.as_str()),
            ("value", value.as_str()),
        ] {
            if text.contains(SEPARATOR) {
                return Err(Error::MalformedAction {
                    action: self.to_string(),
                    reason: format!("{} contains '{}'", field, SEPARATOR),
                });
            }
        }
        Ok(self.to_string())
    }
}

impl fmt::Display for SetAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.namespace,
            self.key,
            value_text(&self.value),
            sep = SEPARATOR
        )
    }
}

impl FromStr for SetAction {
    type Err = Error;

    /// Parse `namespace:key:value`; the value is always a string.
    fn from_str(s: &str) -> Result<Self> {
        let fields: Vec<&str> = s.split(SEPARATOR).collect();
        match fields.as_slice() {
            [namespace, key, value] => Ok(Self::new(*namespace, *key, Value::from(*value))),
            _ => Err(Error::MalformedAction {
                action: s.to_string(),
                reason: format!("expected 3 fields, found {}", fields.len()),
            }),
        }
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
