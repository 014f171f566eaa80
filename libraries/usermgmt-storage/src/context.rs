use crate::{create_pool, run_migrations, users, StorageError};
use async_trait::async_trait;
use sqlx::SqlitePool;
use usermgmt_core::{error::Result, StoredUser, User, UserId, UserPatch, UserRepository};

/// `SQLite`-backed user repository
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool and bring the schema up to date
    ///
    /// # Errors
    /// Returns an error if the connection or the migrations fail
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
    ) -> std::result::Result<Self, StorageError> {
        let pool = create_pool(database_url, max_connections).await?;
        run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: &User) -> Result<StoredUser> {
        Ok(users::create(&self.pool, user).await?)
    }

    async fn get_all(&self) -> Result<Vec<User>> {
        Ok(users::get_all(&self.pool).await?)
    }

    async fn get_by_id(&self, id: UserId) -> Result<User> {
        Ok(users::get_by_id(&self.pool, id).await?)
    }

    async fn update(&self, id: UserId, patch: &UserPatch) -> Result<StoredUser> {
        Ok(users::update(&self.pool, id, patch).await?)
    }

    async fn delete(&self, id: UserId) -> Result<UserId> {
        Ok(users::delete(&self.pool, id).await?)
    }
}
