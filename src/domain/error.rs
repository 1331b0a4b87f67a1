//! Error types for the form engine

use thiserror::Error;

/// Static misconfiguration between the widget tree and the field registry.
///
/// These are authoring bugs, never retried: they surface when a session is
/// created or when a branch is materialized for the first time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A field control points at a key missing from the registry
    #[error("Unknown field '{key}': no entry in the field registry")]
    UnknownField { key: String },

    /// A validator descriptor carries a type the compiler does not know
    #[error("Validator of type '{kind}' on field '{field}' is not supported")]
    UnsupportedValidator { field: String, kind: String },

    /// The same field key is bound by two field-control nodes
    #[error("Field '{key}' is bound by more than one field control")]
    DuplicateField { key: String },
}

/// Errors returned by form session operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// Configuration fault found while materializing controls
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// No live control exists for the key (unknown or currently hidden)
    #[error("Control not found: {0}")]
    ControlNotFound(String),
}
