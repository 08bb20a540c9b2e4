//! Error types for the shared crate
//!
//! Both errors are raised locally, before any request leaves the client.

use thiserror::Error;

/// A lifecycle action was attempted from a state that does not allow it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot {action} a {entity} that is {from}")]
pub struct TransitionError {
    /// Entity kind, e.g. "reschedule request"
    pub entity: &'static str,
    /// Current status label
    pub from: String,
    /// Attempted action
    pub action: &'static str,
}

impl TransitionError {
    pub fn new(entity: &'static str, from: impl Into<String>, action: &'static str) -> Self {
        Self {
            entity,
            from: from.into(),
            action,
        }
    }
}

/// Form data rejected before submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}
