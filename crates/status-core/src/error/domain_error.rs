//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::UserIdParseError;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error(transparent)]
    InvalidUserId(#[from] UserIdParseError),

    #[error("Invalid reaction type: {0}")]
    InvalidReactionType(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidUserId(_) => "INVALID_USER_ID",
            Self::InvalidReactionType(_) => "INVALID_REACTION_TYPE",
            Self::ValidationError(_) => "VALIDATION_ERROR",
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidUserId(_) | Self::InvalidReactionType(_) | Self::ValidationError(_)
        )
    }
}

/// Outcome of a failed status request
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    /// The server answered with a non-success status
    #[error("Server returned {status}: {message}")]
    Status {
        status: u16,
        /// Server error code (e.g. `BAD_REQUEST`) when the body carried one
        code: Option<String>,
        message: String,
    },
}

impl TransportError {
    /// HTTP status of the response, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether an idempotent request may be re-sent after this failure
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Status { status: 502, .. })
    }
}

/// Result type for transport operations
pub type TransportResult<T> = Result<T, TransportError>;
