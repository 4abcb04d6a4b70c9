//! Toolkit error types.

use thiserror::Error;

use crate::primitive::{ClearAnchor, PrimitiveId, PrimitiveKind};
use crate::window::WindowId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolkitError {
    #[error("{0} not found")]
    WindowNotFound(WindowId),

    #[error("{0} has been destroyed")]
    WindowDestroyed(WindowId),

    #[error("{0} not found")]
    PrimitiveNotFound(PrimitiveId),

    #[error("{kind} {primitive} has no content to clear")]
    NotClearable {
        primitive: PrimitiveId,
        kind: PrimitiveKind,
    },

    #[error("bad {kind} index \"{anchor}\" for {primitive}")]
    InvalidAnchor {
        primitive: PrimitiveId,
        kind: PrimitiveKind,
        anchor: ClearAnchor,
    },

    #[error("{kind} {primitive} does not support {operation}")]
    Unsupported {
        primitive: PrimitiveId,
        kind: PrimitiveKind,
        operation: &'static str,
    },
}

/// Result type for toolkit operations.
pub type ToolkitResult<T> = Result<T, ToolkitError>;

/// A key sequence string that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid key sequence {sequence:?}: {reason}")]
pub struct KeyParseError {
    pub sequence: String,
    pub reason: &'static str,
}

impl KeyParseError {
    pub(crate) fn new(sequence: &str, reason: &'static str) -> Self {
        Self {
            sequence: sequence.to_string(),
            reason,
        }
    }
}
