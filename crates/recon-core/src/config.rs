//! Desired-state configuration
//!
//! A [`Config`] maps namespace names to the [`Subconfig`] a caller wants the
//! environment to converge to. It is read once from a TOML document whose
//! top-level tables are namespaces:
//!
//! ```toml
//! [network]
//! hostname = "web1"
//!
//! [aider]
//! packages = ["git", "curl"]
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::subconfig::Subconfig;
use crate::{Error, Result};

/// Desired state for every configured namespace. Immutable after load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config {
    namespaces: BTreeMap<String, Subconfig>,
}

impl Config {
    /// Parse a configuration from TOML content
    ///
    /// Every top-level entry must be a table; anything else is rejected.
    ///
    /// # Example
    ///
    /// ```
    /// use recon_core::Config;
    ///
    /// let config = Config::parse(r#"
    /// [network]
    /// hostname = "web1"
    /// "#).unwrap();
    ///
    /// assert_eq!(config.slice("network").len(), 1);
    /// assert!(config.slice("sshd").is_empty());
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Load a configuration file from disk
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigNotFound`] if `path` does not exist, and a
    /// parse error if the file is not a valid namespace document.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        tracing::debug!(
            path = %path.display(),
            namespaces = config.namespaces.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Desired state for a namespace, if configured
    pub fn get(&self, namespace: &str) -> Option<&Subconfig> {
        self.namespaces.get(namespace)
    }

    /// Desired state for a namespace, empty when not configured
    pub fn slice(&self, namespace: &str) -> Subconfig {
        self.get(namespace).cloned().unwrap_or_default()
    }

    /// Desired state for a namespace that must be configured
    pub fn require(&self, namespace: &str) -> Result<&Subconfig> {
        self.get(namespace)
            .ok_or_else(|| Error::NamespaceNotConfigured {
                namespace: namespace.to_string(),
            })
    }

    /// Configured namespace names, sorted
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.namespaces.keys().map(String::as_str)
    }
}

impl FromIterator<(String, Subconfig)> for Config {
    fn from_iter<I: IntoIterator<Item = (String, Subconfig)>>(iter: I) -> Self {
        Self {
            namespaces: iter.into_iter().collect(),
        }
    }
}
