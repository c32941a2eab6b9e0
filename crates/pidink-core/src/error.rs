//! Editor errors.

use crate::shapes::ShapeId;
use thiserror::Error;

/// Errors surfaced by the editor.
#[derive(Debug, Error)]
pub enum EditorError {
    /// A required mount point is missing at setup time.
    #[error("Missing mount point: {0}")]
    MissingMountPoint(String),
    #[error("Unknown shape: {0}")]
    UnknownShape(ShapeId),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;
