//! Error types for the RentAI client.

use thiserror::Error;

use crate::notification::messages;

/// A shared error type for the entire RentAI client.
///
/// Remote failures, local validation and storage problems all flow through
/// this enum so that callers can branch on the variant instead of on strings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RentaiError {
    /// The service rejected the bearer token (HTTP 401).
    ///
    /// By the time a caller sees this the session has already been cleared.
    #[error("Authentication failed: session expired")]
    Unauthorized,

    /// Any other non-success HTTP status.
    #[error("HTTP error ({status}): {message}")]
    Http { status: u16, message: String },

    /// Transport-level failure (connection refused, timeout, DNS).
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Local validation failure (form fields, locale codes).
    #[error("Validation error: {0}")]
    Validation(String),

    /// An operation needed context the caller never established.
    #[error("No context available: {0}")]
    MissingContext(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Durable storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RentaiError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an Http error
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a MissingContext error
    pub fn missing_context(message: impl Into<String>) -> Self {
        Self::MissingContext(message.into())
    }

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

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
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

    /// Check if this is an authentication failure
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Check if this is a NotFound error, including an HTTP 404
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Http { status: 404, .. }
        )
    }

    /// Check if this error came from talking to a remote service
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized | Self::Http { .. } | Self::Network(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Text suitable for showing to the user.
    ///
    /// Server-provided messages and local validation text pass through;
    /// everything else collapses to the generic failure message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthorized => messages::SESSION_EXPIRED.to_string(),
            Self::Http { message, .. } => message.clone(),
            Self::Validation(message) | Self::MissingContext(message) => message.clone(),
            _ => messages::GENERIC_FAILURE.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for RentaiError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for RentaiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for RentaiError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for RentaiError {
    fn from(err: url::ParseError) -> Self {
        Self::Validation(format!("invalid URL: {}", err))
    }
}

/// A type alias for `Result<T, RentaiError>`.
pub type Result<T> = std::result::Result<T, RentaiError>;
