//! Error types for the Sprout pipeline.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Failures of the external tree-acquisition step.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("Missing credential: environment variable {name} is not set")]
    MissingCredential { name: String },

    #[error("Transport failure: {reason}")]
    Transport { reason: String },

    #[error("Response contains no JSON object")]
    NoJsonPayload,

    #[error("Response JSON could not be parsed: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// The class of a structural violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ValidationErrorKind {
    MalformedInput,
    UnknownComponentKind,
    InvalidProperties,
    EmptyTree,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MalformedInput => "MalformedInput",
            Self::UnknownComponentKind => "UnknownComponentKind",
            Self::InvalidProperties => "InvalidProperties",
            Self::EmptyTree => "EmptyTree",
        };
        f.write_str(name)
    }
}

/// The first structural violation found in a candidate tree.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{kind} at {path}: {message}")]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub message: String,
    /// Position of the offending value, e.g. `components[0].children[2]`.
    pub path: String,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            path: path.into(),
        }
    }
}
