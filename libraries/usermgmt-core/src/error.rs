/// Core error types for user management
use crate::types::UserId;
use crate::validation::ValidationError;
use thiserror::Error;

/// Result type alias using `UserError`
pub type Result<T> = std::result::Result<T, UserError>;

/// Core error type shared by the repository and the service layer
#[derive(Error, Debug)]
pub enum UserError {
    /// One or more payload fields were rejected
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No stored user has this id
    #[error("User not found: {0}")]
    NotFound(UserId),

    /// A concurrent writer changed the user between read and write
    #[error("User was modified concurrently: {0}")]
    Conflict(UserId),

    /// Any other persistence failure
    #[error("Storage error: {0}")]
    Storage(String),
}

impl UserError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
