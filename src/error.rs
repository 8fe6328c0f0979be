//! Error types for keyed-search.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or loading search structures.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Hash table errors
    #[error("Hash table capacity must be non-zero")]
    ZeroCapacity,

    #[error("No free slot on probe sequence after {attempts} attempts (capacity {capacity})")]
    ProbeExhausted { capacity: usize, attempts: usize },

    // Loader errors
    #[error("Parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

impl Error {
    /// Attach a line number to a record parse failure.
    pub(crate) fn at_line(self, line: usize) -> Self {
        match self {
            Error::Parse { reason, .. } => Error::Parse { line, reason },
            other => other,
        }
    }
}
