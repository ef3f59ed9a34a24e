//! Storage error types.

use thiserror::Error;

/// Errors from snapshot I/O.
///
/// These never escape the stores' public mutation API: persistence is
/// best-effort and a failed write leaves the in-memory state authoritative.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LibraryError>;
