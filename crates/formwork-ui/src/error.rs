//! Form error types.

use formwork_toolkit::{KeyParseError, ToolkitError, WindowId};
use thiserror::Error;

use crate::content::ContentTag;
use crate::handle::Handle;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The handle was not issued by this form, or nothing was registered
    /// under it.
    #[error("{0} is not registered in this form")]
    UnknownHandle(Handle),

    /// A button was requested without a command.
    #[error("no command specified for {tag}")]
    MissingCallback { tag: ContentTag },

    #[error(transparent)]
    InvalidKeySequence(#[from] KeyParseError),

    /// The form's window has been destroyed.
    #[error("{0} has been destroyed")]
    WindowDestroyed(WindowId),

    #[error("toolkit error: {0}")]
    Toolkit(#[from] ToolkitError),
}

/// Result type for form operations.
pub type FormResult<T> = Result<T, FormError>;
