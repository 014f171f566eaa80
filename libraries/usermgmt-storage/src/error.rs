/// Storage-specific errors
use thiserror::Error;
use usermgmt_core::{UserError, UserId};

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// No row for this user id
    #[error("User not found: {0}")]
    NotFound(UserId),

    /// The row changed between read and conditional write
    #[error("Concurrent update detected for user {0}")]
    Conflict(UserId),

    /// A row could not be mapped to or from the domain type
    #[error("Row mapping error: {0}")]
    Mapping(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    /// Create a mapping error
    pub fn mapping(msg: impl Into<String>) -> Self {
        Self::Mapping(msg.into())
    }
}

impl From<StorageError> for UserError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(id) => UserError::NotFound(id),
            StorageError::Conflict(id) => UserError::Conflict(id),
            other => UserError::storage(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_survives_conversion() {
        let id = UserId::generate();
        let err: UserError = StorageError::NotFound(id).into();
        assert!(matches!(err, UserError::NotFound(found) if found == id));
    }

    #[test]
    fn conflict_survives_conversion() {
        let id = UserId::generate();
        let err: UserError = StorageError::Conflict(id).into();
        assert!(matches!(err, UserError::Conflict(found) if found == id));
    }

    #[test]
    fn other_errors_become_storage_errors() {
        let err: UserError = StorageError::mapping("bad status").into();
        match err {
            UserError::Storage(msg) => assert!(msg.contains("bad status")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
