//! Error types for songmap-mapper

use thiserror::Error;

/// Song-level reconciliation error
///
/// Query failures never surface here: the coordinator absorbs them.
#[derive(Debug, Error)]
pub enum MapError {
    /// Source song cannot be reconciled (empty id or name)
    #[error("Invalid song: {0}")]
    InvalidSong(String),

    /// songmap-common error
    #[error("Common error: {0}")]
    Common(#[from] songmap_common::Error),
}

/// Result type for reconciliation
pub type MapResult<T> = Result<T, MapError>;
