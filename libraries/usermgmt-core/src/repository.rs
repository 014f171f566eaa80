//! Repository trait for user persistence

use crate::error::Result;
use crate::types::{StoredUser, User, UserId, UserPatch};
use async_trait::async_trait;

/// Storage capability for the user resource
///
/// This trait abstracts persistence so the service layer can run against
/// the `SQLite` implementation or a test double.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user
    ///
    /// The caller assigns `user.id` before calling. Returns the stored
    /// id, email and status.
    async fn create(&self, user: &User) -> Result<StoredUser>;

    /// Get every user in insertion order
    async fn get_all(&self) -> Result<Vec<User>>;

    /// Get a user by id
    ///
    /// Fails with `UserError::NotFound` when no row matches.
    async fn get_by_id(&self, id: UserId) -> Result<User>;

    /// Merge `patch` onto the stored user and write the result back
    ///
    /// The read, merge and write happen atomically. Fails with
    /// `UserError::NotFound` for an unknown id and `UserError::Conflict`
    /// when another writer got there first.
    async fn update(&self, id: UserId, patch: &UserPatch) -> Result<StoredUser>;

    /// Hard-delete a user, returning the deleted id
    async fn delete(&self, id: UserId) -> Result<UserId>;
}
