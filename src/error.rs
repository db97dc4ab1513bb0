//! Error handling for suffixseek
//!
//! Construction-time contract violations and caller mistakes are reported
//! through [`SearchError`]. Per-candidate bounds conditions during a search
//! (pattern running past the end of the data, suffix too short) are never
//! errors: they are resolved as "no match" inside the searcher.

use rayon::ThreadPoolBuildError;
use thiserror::Error;

/// Error type for all suffixseek operations
#[derive(Error, Debug)]
pub enum SearchError {
    /// I/O errors (missing input, unreadable config, log directory)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Needletail parser error
    #[error("FASTA parsing error: {0}")]
    Fasta(#[from] needletail::errors::ParseError),

    /// The loader handed over a valid-byte count the buffer cannot hold
    #[error("Inconsistent sequence store: {valid_bytes} valid bytes declared but the buffer holds {capacity}")]
    Construction { valid_bytes: usize, capacity: usize },

    /// Empty search pattern
    #[error("Search pattern must not be empty")]
    InvalidPattern,

    /// Index and store disagree about the sequence length
    #[error("Suffix index covers {indexed} bytes but the sequence store exposes {available}")]
    IndexMismatch { indexed: usize, available: usize },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Thread pool build error: {0}")]
    ThreadPool(#[from] ThreadPoolBuildError),
}

impl SearchError {
    /// Create a Construction error from the offending pair
    pub fn construction(valid_bytes: usize, capacity: usize) -> Self {
        Self::Construction { valid_bytes, capacity }
    }

    /// Create an IndexMismatch error
    pub fn index_mismatch(indexed: usize, available: usize) -> Self {
        Self::IndexMismatch { indexed, available }
    }

    /// Create a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Result type alias for suffixseek operations
pub type Result<T> = std::result::Result<T, SearchError>;
