//! Error types for fastq-detangler

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for detangling operations
pub type Result<T> = std::result::Result<T, DetangleError>;

/// Why an input path was rejected as invalid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInputReason {
    /// The path exists but is not a regular file
    NotAFile,
    /// The file is zero bytes long
    Empty,
    /// Parsing produced no R1 and no R2 records
    NoValidReads,
}

impl fmt::Display for InvalidInputReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAFile => f.write_str("input path is not a file"),
            Self::Empty => f.write_str("input file is empty"),
            Self::NoValidReads => f.write_str("input file contains no valid reads"),
        }
    }
}

/// Fatal errors that abort a detangling run
///
/// Per-record anomalies (bad headers, truncated or malformed records) are
/// not errors; they are reported through [`ParseReport`](crate::io::ParseReport).
#[derive(Debug, Error)]
pub enum DetangleError {
    /// Input path does not exist
    #[error("Input file not found: {}", path.display())]
    NotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// Input exists but cannot be detangled
    #[error("{reason}: {}", path.display())]
    InvalidInput {
        /// Offending input path
        path: PathBuf,
        /// What was wrong with it
        reason: InvalidInputReason,
    },

    /// I/O error while reading input
    #[error("Error reading input file: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error while writing one of the output files
    #[error("Error writing to {}: {source}", path.display())]
    Write {
        /// Output file that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl DetangleError {
    /// Whether this error came from the filesystem rather than the input's content
    pub fn is_io_failure(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Write { .. })
    }

    /// The invalid-input reason, if this is an `InvalidInput` error
    pub fn invalid_input_reason(&self) -> Option<InvalidInputReason> {
        match self {
            Self::InvalidInput { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}
