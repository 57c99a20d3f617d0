//! Error types for the ftmatch library.
//!
//! Expected "no match" outcomes of the merge engine are never errors; they are
//! reported as `None`. The variants here cover malformed input records,
//! violated construction contracts and failures of the surrounding tooling.
//!
//! # Examples
//!
//! ```
//! use ftmatch::error::{FtMatchError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(FtMatchError::invalid_record("record is empty"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for ftmatch operations.
#[derive(Error, Debug)]
pub enum FtMatchError {
    /// I/O errors (reading scan input files).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A raw scan record does not follow the `[node_id, pos_1, ..., pos_k]` shape.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// A pointer array is not parallel to its position array.
    #[error("Pointer length mismatch: expected {expected} pointers, got {actual}")]
    PointerLength { expected: usize, actual: usize },

    /// Provenance pointers are missing or out of range.
    #[error("Provenance error: {0}")]
    Provenance(String),

    /// Evaluator configuration is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with FtMatchError.
pub type Result<T> = std::result::Result<T, FtMatchError>;

impl FtMatchError {
    /// Create a new invalid record error.
    pub fn invalid_record<S: Into<String>>(msg: S) -> Self {
        FtMatchError::InvalidRecord(msg.into())
    }

    /// Create a new pointer length error.
    pub fn pointer_length(expected: usize, actual: usize) -> Self {
        FtMatchError::PointerLength { expected, actual }
    }

    /// Create a new provenance error.
    pub fn provenance<S: Into<String>>(msg: S) -> Self {
        FtMatchError::Provenance(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        FtMatchError::InvalidConfig(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        FtMatchError::Other(format!("Invalid argument: {}", msg.into()))
    }
}
