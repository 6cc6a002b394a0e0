use thiserror::Error;

/// Main error type for boolex operations
#[derive(Error, Debug)]
pub enum BoolexError {
    /// The assembled expression failed the backend filter grammar check.
    ///
    /// Displays as the bare validator message so callers can surface it
    /// unchanged.
    #[error("{0}")]
    InvalidFilter(String),

    #[error("facet source error: {0}")]
    Source(String),
}

/// Result type alias for boolex operations
pub type Result<T> = std::result::Result<T, BoolexError>;
