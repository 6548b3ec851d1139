//! Error types for wrapmap

use thiserror::Error;

/// wrapmap error types
#[derive(Debug, Error)]
pub enum Error {
    /// Dynamic property access resolved to neither a stored key nor a
    /// proxyable operation name. Raised only under strict configuration.
    #[error("Property [{0}] does not exist on this collection instance")]
    MissingProperty(String),
    /// A delegated operation name the reference engine does not recognize.
    /// Always surfaced to the caller, never suppressed or retried.
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
    /// The reference engine rejected an operation, annotated with its name.
    #[error("Operation '{op}' failed: {message}")]
    Operation {
        /// The delegated operation name.
        op: String,
        /// What the engine objected to.
        message: String,
    },
    /// A value could not be used as a mapping key.
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    /// JSON parsing or serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build an [`Error::Operation`] for `op`.
    pub fn operation(op: &str, message: impl Into<String>) -> Self {
        Error::Operation {
            op: op.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
