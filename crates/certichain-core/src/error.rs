use crate::document_state::DocumentStatus;

/// Core errors.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid state transition from {from} to {to}")]
    InvalidStateTransition {
        from: DocumentStatus,
        to: DocumentStatus,
    },

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("validation error: {0}")]
    ValidationError(String),
}
