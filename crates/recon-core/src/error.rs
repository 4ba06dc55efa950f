//! Error types for recon-core

use std::path::PathBuf;

/// Result type for recon-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading configuration, probing or applying
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found at expected path
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// The environment does not know how to observe this namespace
    #[error("Unknown namespace: {namespace}")]
    UnknownNamespace { namespace: String },

    /// A component requires a configuration slice that was not provided
    #[error("Namespace {namespace} is not configured")]
    NamespaceNotConfigured { namespace: String },

    /// A configuration key outside the vocabulary of its namespace
    #[error("Invalid key {key} in namespace {namespace}")]
    InvalidKey { namespace: String, key: String },

    /// A configuration value of the wrong shape for its key
    #[error("Invalid value for {namespace}.{key}: {reason}")]
    InvalidValue {
        namespace: String,
        key: String,
        reason: String,
    },

    /// Component types that declare each other as dependencies
    #[error("Dependency cycle: {chain}")]
    DependencyCycle { chain: String },

    /// An action that cannot be encoded or decoded
    #[error("Malformed action {action:?}: {reason}")]
    MalformedAction { action: String, reason: String },

    /// Applying an action against the environment failed
    #[error("Action failed: {action}: {reason}")]
    ActionFailed { action: String, reason: String },

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}

impl Error {
    /// Shorthand for [`Error::UnknownNamespace`]
    pub fn unknown_namespace(namespace: impl Into<String>) -> Self {
        Self::UnknownNamespace {
            namespace: namespace.into(),
        }
    }

    /// Shorthand for [`Error::ActionFailed`]
    pub fn action_failed(action: impl ToString, reason: impl Into<String>) -> Self {
        Self::ActionFailed {
            action: action.to_string(),
            reason: reason.into(),
        }
    }
}
