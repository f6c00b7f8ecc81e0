//! Error types for wizard operations

use thiserror::Error;

/// Errors that can occur in wizard operations
#[derive(Debug, Clone, Error)]
pub enum WizardError {
    /// Request record not found in the persistence layer
    #[error("Request record not found: {0}")]
    RecordNotFound(String),

    /// Form values failed validation before a step was submitted
    #[error("Validation failed: {0}")]
    ValidationFailure(String),

    /// Event type has no transition from the current step
    #[error("Event {event} is not acceptable in step {step}")]
    EventNotApplicable {
        /// Kind of event that was sent
        event: String,
        /// Step the machine was in when the event arrived
        step: String,
    },

    /// A record already exists for the given identifier
    #[error("Request record already exists: {0}")]
    AlreadyExists(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Error from the persistence collaborator
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Invalid operation
    #[error("Invalid operation: {reason}")]
    InvalidOperation {
        /// Reason why the operation is invalid
        reason: String,
    },
}

/// Result type for wizard operations
pub type WizardResult<T> = Result<T, WizardError>;

impl From<serde_json::Error> for WizardError {
    fn from(err: serde_json::Error) -> Self {
        WizardError::SerializationError(err.to_string())
    }
}

impl WizardError {
    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, WizardError::RecordNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(self, WizardError::ValidationFailure(_))
    }

    /// Check if this error means the event should not have been offered
    /// by the UI in the first place
    pub fn is_not_applicable(&self) -> bool {
        matches!(self, WizardError::EventNotApplicable { .. })
    }
}
