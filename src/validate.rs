//! Record Validation
//!
//! Records that can check their own invariants implement [`Validate`].
//! Only the validated store paths (`save`, `get`) call it.

use thiserror::Error;

/// Error raised by a record's own validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Capability of a record to assert its own correctness.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}
