//! Error types for the Siteplan application.

use crate::validation::ValidationError;
use thiserror::Error;

/// A shared error type for the entire Siteplan application.
///
/// Variants fall into two classes: input errors (`Validation`) that the
/// caller can correct, and storage errors (`Io`, `Serialization`) raised by
/// the session store. `NotFound`, `Config` and `Internal` cover the rest.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SiteplanError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// The requested configuration was rejected before reaching the core
    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SiteplanError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if the caller's request was malformed or out of bounds.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error came from reading or writing the persisted store.
    pub fn is_storage_error(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Serialization { .. })
    }

    /// Returns the validation failure, if this is an input error.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for SiteplanError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for SiteplanError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SiteplanError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, SiteplanError>`.
pub type Result<T> = std::result::Result<T, SiteplanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes_are_distinct() {
        let input: SiteplanError = ValidationError::EmptyConfiguration.into();
        assert!(input.is_input_error());
        assert!(!input.is_storage_error());

        let storage = SiteplanError::io("disk full");
        assert!(storage.is_storage_error());
        assert!(!storage.is_input_error());

        let missing = SiteplanError::not_found("session", "SAVE-00000000");
        assert!(missing.is_not_found());
        assert!(!missing.is_storage_error());
    }

    #[test]
    fn test_json_error_conversion() {
        let err = serde_json::from_str::<serde_json::Value>("{not json")
            .map_err(SiteplanError::from)
            .unwrap_err();

        match err {
            SiteplanError::Serialization { format, .. } => assert_eq!(format, "JSON"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_io_error_message_keeps_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = SiteplanError::from(io);
        assert!(err.to_string().contains("PermissionDenied"));
    }
}
