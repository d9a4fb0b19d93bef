use thiserror::Error;

use crate::domain::models::validation::ValidationItem;

/// Backend-independent classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    ValidationFailed,
    Unexpected,
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    /// The named resource does not exist.
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    Conflict(String),

    #[error("Invalid data")]
    ValidationFailed(Vec<ValidationItem>),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl ApplicationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApplicationError::NotFound(_) => ErrorKind::NotFound,
            ApplicationError::Conflict(_) => ErrorKind::Conflict,
            ApplicationError::ValidationFailed(_) => ErrorKind::ValidationFailed,
            ApplicationError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }
}
