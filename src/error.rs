//! Error types for MinPHR dataset loading.

use thiserror::Error;

/// Errors produced while decoding or loading an HRTF dataset.
///
/// Every variant is recoverable at the granularity of a single load attempt:
/// the failing buffer is abandoned and the caller may move on to the next
/// candidate dataset.
#[derive(Error, Debug)]
pub enum HrtfError {
    #[error("unexpected end of data (need {needed} more bytes, have {remaining})")]
    Truncated { needed: usize, remaining: usize },

    #[error("unrecognized header magic {found:?}")]
    UnrecognizedHeader { found: [u8; 8] },

    #[error("unsupported {field}: {value} ({detail})")]
    OutOfRange {
        field: &'static str,
        value: u32,
        detail: &'static str,
    },

    #[error("invalid elevation offset at ring {index}: {offset} (previous bound {prev})")]
    InvalidOffsetOrdering { index: usize, offset: u32, prev: u32 },

    #[error("failed to allocate {bytes} bytes for the coefficient table")]
    Allocation { bytes: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HrtfError>;
