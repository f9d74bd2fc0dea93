//! Error types for RTF reading.

use thiserror::Error;

/// Result type for RTF operations.
pub type RtfResult<T> = Result<T, RtfError>;

/// RTF reading errors.
///
/// Offsets are byte positions in the input buffer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RtfError {
    /// A buffer could not grow
    #[error("out of memory while buffering RTF text")]
    NoMemory,

    /// Group end with no matching group begin
    #[error("unmatched '}}' at offset {offset}")]
    Underflow { offset: usize },

    /// Group nesting exceeded the configured limit
    #[error("group nesting deeper than {depth} levels")]
    Overflow { depth: usize },

    /// Bad digit in a `\'hh` escape
    #[error("invalid hex escape at offset {offset}")]
    InvalidHex { offset: usize },

    /// Input ended inside a control word or escape
    #[error("input ended inside a control word at offset {offset}")]
    IncompleteKeyword { offset: usize },

    /// Control word longer than the keyword limit
    #[error("control word too long at offset {offset}")]
    KeywordTooLong { offset: usize },

    /// Numeric parameter longer than the parameter limit
    #[error("control word parameter too long at offset {offset}")]
    ParameterTooLong { offset: usize },
}

impl From<std::collections::TryReserveError> for RtfError {
    fn from(_: std::collections::TryReserveError) -> Self {
        RtfError::NoMemory
    }
}
