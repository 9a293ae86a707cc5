//! NDR marshaling errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NdrError {
    #[error("buffer underflow: needed {needed} bytes, have {have}")]
    BufferUnderflow { needed: usize, have: usize },

    #[error("conformance mismatch: max_count {max_count}, actual_count {actual_count}")]
    ConformanceMismatch { max_count: u32, actual_count: u32 },

    #[error("allocation of {requested} bytes exceeds limit {limit}")]
    AllocationLimitExceeded { requested: usize, limit: usize },

    #[error("invalid pointer referent: 0x{0:08x}")]
    InvalidPointer(u32),

    #[error("invalid UTF-16 data")]
    Utf16Error,

    #[error("invalid enum value: {0}")]
    InvalidEnumValue(u32),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, NdrError>;
