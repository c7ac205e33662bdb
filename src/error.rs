//! Error types for the Calico operator
//!
//! Defaulting itself is total and never fails. These errors cover the edges
//! around it: turning manifest text into typed resources and parsing enum
//! values supplied as strings.

use thiserror::Error;

use crate::yaml::YamlError;

/// Main error type for Calico operator operations
#[derive(Debug, Error)]
pub enum Error {
    /// Manifest text is not valid YAML
    #[error("yaml error: {message}")]
    Yaml {
        /// Description of the parse failure
        message: String,
    },

    /// Serialization/deserialization error
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of what failed
        message: String,
        /// The resource kind being serialized (if known)
        kind: Option<String>,
    },

    /// A string could not be parsed into a typed field value
    #[error("invalid value for {field}: {message}")]
    InvalidValue {
        /// The field path (e.g., "spec.variant")
        field: String,
        /// Description of what's invalid
        message: String,
    },
}

impl Error {
    /// Create a serialization error for a specific resource kind
    pub fn serialization_for(kind: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Serialization {
            message: msg.into(),
            kind: Some(kind.into()),
        }
    }

    /// Create an invalid value error for the given field path
    pub fn invalid_value(field: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: msg.into(),
        }
    }
}

impl From<YamlError> for Error {
    fn from(err: YamlError) -> Self {
        Self::Yaml {
            message: err.to_string(),
        }
    }
}
