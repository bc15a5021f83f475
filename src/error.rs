//! Error types for staffscroll.

use thiserror::Error;

/// Errors raised while validating input, mapping time, or rendering.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StaffError {
    /// A note event that cannot be placed on the grid.
    #[error("Invalid note '{id}': {reason}")]
    InvalidInput { id: String, reason: String },

    /// A tempo, grid, or configuration value out of range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// No usable rendering surface. Grouping and mapping still work.
    #[error("Rendering unavailable: {0}")]
    RenderingUnavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StaffError {
    fn from(e: serde_json::Error) -> Self {
        StaffError::Serialization(e.to_string())
    }
}

/// Result type alias
pub type StaffResult<T> = Result<T, StaffError>;
