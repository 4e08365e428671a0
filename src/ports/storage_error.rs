//! Errors shared by the input and output ports.

use crate::domain::foundation::ValidationError;

/// Errors that can occur while loading inputs or persisting reports
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// Source not found
    NotFound(String),
    /// IO error
    IoError(String),
    /// Content could not be parsed
    Malformed(String),
    /// Content parsed but violates a domain invariant
    Invalid(ValidationError),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::IoError(msg) => write!(f, "IO error: {}", msg),
            Self::Malformed(msg) => write!(f, "Malformed content: {}", msg),
            Self::Invalid(err) => write!(f, "Invalid content: {}", err),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<ValidationError> for StorageError {
    fn from(err: ValidationError) -> Self {
        Self::Invalid(err)
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(err.to_string()),
            _ => Self::IoError(err.to_string()),
        }
    }
}
