//! Error types for the chunked aggregation core.

use thiserror::Error;

/// Result type for aggregation operations.
pub type StatsResult<T> = Result<T, StatsError>;

/// Errors surfaced by the aggregation pipeline. Parse-layer variants carry
/// the chunk index and the offending raw line so a failure points at the
/// exact input that caused it.
#[derive(Error, Debug)]
pub enum StatsError {
    /// I/O operation failed (file size query or positioned read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A data line did not split into exactly two fields.
    #[error("format error in chunk {chunk}: expected exactly two fields in line {line:?}")]
    Format { chunk: usize, line: String },

    /// The value field of a data line is not a valid decimal number.
    #[error("parse error in chunk {chunk}: value {value:?} is not numeric in line {line:?}")]
    Parse {
        chunk: usize,
        value: String,
        line: String,
    },

    /// Chunk count must be at least 1.
    #[error("invalid chunk count {0}: must be >= 1")]
    InvalidChunkCount(usize),
}
