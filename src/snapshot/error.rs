//! Snapshot encoding errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot JSON encoding: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot binary encoding: {0}")]
    Binary(#[from] bincode::Error),

    /// Written by a format this build cannot read.
    #[error("snapshot format v{found} cannot be read (expected v{supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}
