use std::io;

use thiserror::Error;

use crate::application::error::ApplicationError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("File already exists: {0}")]
    AlreadyExists(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Storage provider error: {0}")]
    ProviderError(String),
}

impl StorageError {
    /// Classifies a filesystem failure on `path`.
    pub fn from_io(error: io::Error, path: &str) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => StorageError::NotFound(path.to_string()),
            io::ErrorKind::AlreadyExists => StorageError::AlreadyExists(path.to_string()),
            _ => StorageError::Io {
                path: path.to_string(),
                source: error,
            },
        }
    }
}

impl From<StorageError> for ApplicationError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NotFound(_) => ApplicationError::NotFound("File".to_string()),
            StorageError::AlreadyExists(_) => ApplicationError::Conflict("File".to_string()),
            other => ApplicationError::Unexpected(format!("Storage error: {}", other)),
        }
    }
}

impl From<reqwest::Error> for StorageError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            StorageError::NetworkError("Request timeout".to_string())
        } else if error.is_connect() {
            StorageError::NetworkError(format!("Connection failed: {}", error))
        } else if let Some(status) = error.status() {
            match status.as_u16() {
                404 => StorageError::NotFound(error.to_string()),
                409 => StorageError::AlreadyExists(error.to_string()),
                401 | 403 => StorageError::InvalidCredentials(error.to_string()),
                _ => StorageError::ProviderError(error.to_string()),
            }
        } else {
            StorageError::ProviderError(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::error::ErrorKind;

    fn kind_of(error: io::Error) -> ErrorKind {
        ApplicationError::from(StorageError::from_io(error, "storage/file/x.txt")).kind()
    }

    #[test]
    fn test_io_errors_are_normalized() {
        assert_eq!(kind_of(io::Error::from(io::ErrorKind::NotFound)), ErrorKind::NotFound);
        assert_eq!(
            kind_of(io::Error::from(io::ErrorKind::AlreadyExists)),
            ErrorKind::Conflict
        );
        assert_eq!(
            kind_of(io::Error::from(io::ErrorKind::PermissionDenied)),
            ErrorKind::Unexpected
        );
    }

    #[test]
    fn test_provider_errors_are_unexpected() {
        for error in [
            StorageError::NetworkError("timeout".into()),
            StorageError::InvalidCredentials("bad key".into()),
            StorageError::ProviderError("500".into()),
        ] {
            assert_eq!(ApplicationError::from(error).kind(), ErrorKind::Unexpected);
        }
    }
}
