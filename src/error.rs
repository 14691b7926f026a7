//! Error taxonomy for control tree operations.

use crate::control::ControlId;
use crate::style::parser::ParseError;

/// Errors raised synchronously at the point of misuse.
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    /// A caller supplied an argument the operation cannot accept.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The operation is not valid for the current tree state.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
    /// The control was disposed and can no longer be used.
    #[error("control {0:?} has been disposed")]
    ObjectDisposed(ControlId),
    /// Stylesheet source failed to parse.
    #[error("stylesheet error: {0}")]
    Stylesheet(#[from] ParseError),
    /// The box layout solver rejected its input.
    #[error("layout error: {0}")]
    Layout(String),
}

/// Convenience alias used throughout the crate.
pub type UiResult<T> = Result<T, UiError>;

impl From<taffy::tree::TaffyError> for UiError {
    fn from(err: taffy::tree::TaffyError) -> Self {
        UiError::Layout(err.to_string())
    }
}
