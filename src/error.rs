//! kbtext error types

use thiserror::Error;

/// Raised when a text blob yields no knowledge base at all.
///
/// This is the only failure the parser reports. Malformed individual lines
/// are skipped instead (see [`crate::knowledge::ParseReport`]).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Format error: {message}")]
pub struct FormatError {
    message: String,
}

impl FormatError {
    /// Input with no structural entities and no explicit "none" marker
    pub fn no_data() -> Self {
        Self {
            message: "no data recognized".to_string(),
        }
    }

    /// Human-readable description
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// kbtext error type
#[derive(Error, Debug)]
pub enum Error {
    /// Text format could not be parsed
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for kbtext operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_message() {
        let err = FormatError::no_data();
        assert_eq!(err.message(), "no data recognized");
        assert_eq!(err.to_string(), "Format error: no data recognized");
    }

    #[test]
    fn test_format_error_converts() {
        let err: Error = FormatError::no_data().into();
        assert!(matches!(err, Error::Format(_)));
        assert_eq!(err.to_string(), "Format error: no data recognized");
    }
}
