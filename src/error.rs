//! Error types for SparseStore
//!
//! Provides a unified error type for all fallible operations.

use thiserror::Error;

/// Result type alias using SparseError
pub type Result<T> = std::result::Result<T, SparseError>;

/// Unified error type for SparseStore operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SparseError {
    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Range Errors
    // -------------------------------------------------------------------------
    #[error("Range overflow: offset {offset} + len {len} exceeds the addressable space")]
    RangeOverflow { offset: usize, len: usize },
}

/// End of the range `[offset, offset + len)`, or `RangeOverflow`.
pub(crate) fn range_end(offset: usize, len: usize) -> Result<usize> {
    offset
        .checked_add(len)
        .ok_or(SparseError::RangeOverflow { offset, len })
}
