//! Error types for Cutline.

use thiserror::Error;

/// Main error type for Cutline operations.
///
/// Every edit that fails leaves the timeline untouched; the variant says why
/// the edit was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CutlineError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Placement conflict: {0}")]
    Conflict(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Fieldless category of a [`CutlineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    DuplicateId,
    Conflict,
    InvalidArgument,
    Serialization,
}

impl CutlineError {
    /// Category of this error, without the message.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::DuplicateId(_) => ErrorKind::DuplicateId,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::Serialization(_) => ErrorKind::Serialization,
        }
    }

    pub fn track_not_found(id: &str) -> Self {
        Self::NotFound(format!("track '{id}'"))
    }

    pub fn clip_not_found(id: &str) -> Self {
        Self::NotFound(format!("clip '{id}'"))
    }
}

/// Result type alias for Cutline operations.
pub type Result<T> = std::result::Result<T, CutlineError>;
