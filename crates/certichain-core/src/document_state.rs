use std::fmt;

use crate::error::CoreError;

/// The states of a submitted document's verification lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DocumentStatus {
    /// Document is recorded and awaiting its intended issuer's action.
    Pending,
    /// Document has been verified by its intended issuer. Final state.
    Verified,
}

impl DocumentStatus {
    /// Whether this is a final (terminal) state.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Verified)
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Verified => write!(f, "Verified"),
        }
    }
}

/// Events that trigger document state transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentEvent {
    /// The intended issuer verifies the document.
    Verify,
}

/// Manages document state transitions.
///
/// Valid transitions:
/// - Pending → Verified (Verify)
///
/// Verified is final: a document can never return to Pending, and no second
/// verification is possible.
pub struct DocumentStateMachine;

impl DocumentStateMachine {
    /// Attempt a state transition based on an event.
    /// Returns the new state on success, or an error for invalid transitions.
    pub fn transition(
        current: DocumentStatus,
        event: DocumentEvent,
    ) -> Result<DocumentStatus, CoreError> {
        let new_state = match (current, event) {
            (DocumentStatus::Pending, DocumentEvent::Verify) => DocumentStatus::Verified,

            // All other transitions are invalid
            (DocumentStatus::Verified, DocumentEvent::Verify) => {
                return Err(CoreError::InvalidStateTransition {
                    from: current,
                    to: DocumentStatus::Verified,
                });
            }
        };

        tracing::debug!(
            from = %current,
            to = %new_state,
            event = ?event,
            "document state transition"
        );

        Ok(new_state)
    }

    /// Check if a transition is valid without performing it.
    pub fn can_transition(current: DocumentStatus, event: DocumentEvent) -> bool {
        Self::transition(current, event).is_ok()
    }
}
