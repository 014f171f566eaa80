/// User service: validation, id assignment and repository calls
use crate::error::Result;
use std::sync::Arc;
use usermgmt_core::{
    CreateUser, StoredUser, UpdateUser, User, UserId, UserRepository, UserValidator,
};

pub struct UserService {
    repo: Arc<dyn UserRepository>,
    validator: UserValidator,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>, validator: UserValidator) -> Self {
        Self { repo, validator }
    }

    /// Validate and persist a new user under a freshly generated id
    pub async fn create(&self, payload: &CreateUser) -> Result<StoredUser> {
        let new_user = self.validator.validate_create(payload).map_err(|e| {
            tracing::warn!(violations = %e.summary(), "Rejected create payload");
            e
        })?;

        let user = new_user.into_user(UserId::generate());
        let stored = self.repo.create(&user).await?;

        tracing::info!(user_id = %stored.id, "User created");
        Ok(stored)
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        Ok(self.repo.get_all().await?)
    }

    pub async fn get(&self, id: UserId) -> Result<User> {
        Ok(self.repo.get_by_id(id).await?)
    }

    /// Validate a partial payload and merge it onto the stored user
    pub async fn update(&self, id: UserId, payload: &UpdateUser) -> Result<StoredUser> {
        let patch = self.validator.validate_update(payload).map_err(|e| {
            tracing::warn!(user_id = %id, violations = %e.summary(), "Rejected update payload");
            e
        })?;

        let stored = self.repo.update(id, &patch).await?;

        tracing::info!(user_id = %id, "User updated");
        Ok(stored)
    }

    pub async fn delete(&self, id: UserId) -> Result<UserId> {
        let deleted = self.repo.delete(id).await?;

        tracing::info!(user_id = %deleted, "User deleted");
        Ok(deleted)
    }
}
