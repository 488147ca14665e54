//! Account error types

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during account operations
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Please fill in all required fields")]
    MissingCredentials,

    #[error("Username already exists: {0}")]
    UsernameTaken(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Password hashing failed: {0}")]
    HashFailed(String),

    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),
}

impl From<std::io::Error> for ProfileError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(StorageError::Io(err))
    }
}

impl From<serde_json::Error> for ProfileError {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage(StorageError::Json(err))
    }
}

/// Result type alias for account operations
pub type ProfileResult<T> = Result<T, ProfileError>;
