//! Error types for the board, its text form, settings and pattern files.

use thiserror::Error;

/// Board construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board dimensions must be positive, got {width}x{height}")]
    EmptyDimensions { width: usize, height: usize },

    #[error("board of {width}x{height} cells is too large")]
    TooLarge { width: usize, height: usize },
}

/// Errors raised while reading a board back from its text form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("missing {0} in board header")]
    MissingHeader(&'static str),

    #[error("invalid {field} in board header: {token:?}")]
    InvalidHeader { field: &'static str, token: String },

    #[error("board is {expected_width}x{expected_height} but text describes {width}x{height}")]
    DimensionMismatch {
        expected_width: usize,
        expected_height: usize,
        width: usize,
        height: usize,
    },

    #[error("expected {expected} cell tokens, found {found}")]
    TooFewCells { expected: usize, found: usize },

    #[error("invalid cell token {token:?} at index {index}")]
    InvalidCell { index: usize, token: String },
}

/// Settings validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Errors from loading or saving a pattern file.
#[derive(Debug, Error)]
pub enum PatternFileError {
    #[error("pattern file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed pattern file: {0}")]
    Format(#[from] FormatError),
}
