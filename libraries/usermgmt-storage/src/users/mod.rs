//! User table queries and row mapping

use crate::error::{Result, StorageError};
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Row, Sqlite, SqlitePool};
use usermgmt_core::{merge, StoredUser, User, UserId, UserPatch, UserStatus};

const SELECT_ALL: &str = "SELECT user_id, first_name, last_name, email, phone, age, status, version \
     FROM users ORDER BY rowid";

const SELECT_BY_ID: &str = "SELECT user_id, first_name, last_name, email, phone, age, status, version \
     FROM users WHERE user_id = ?";

/// A full `users` row as stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub age: i32,
    pub status: i32,
    pub version: i64,
}

impl UserRow {
    fn from_sqlite(row: &SqliteRow) -> Result<Self> {
        Ok(Self {
            user_id: row.try_get("user_id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            age: row.try_get("age")?,
            status: row.try_get("status")?,
            version: row.try_get("version")?,
        })
    }

    /// Map a domain user onto a row at the given version
    ///
    /// Fails if the age does not fit the 32-bit column or the status is the
    /// unspecified placeholder.
    pub fn from_user(user: &User, version: i64) -> Result<Self> {
        let age = i32::try_from(user.age)
            .map_err(|_| StorageError::mapping(format!("age out of range: {}", user.age)))?;
        if user.status.is_unspecified() {
            return Err(StorageError::mapping("status must be set before storing"));
        }

        Ok(Self {
            user_id: user.id.to_hyphenated(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            age,
            status: user.status.code(),
            version,
        })
    }

    /// Map the row back to the domain type, widening `age`
    pub fn into_user(self) -> Result<User> {
        Ok(User {
            id: parse_user_id(&self.user_id)?,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            age: i64::from(self.age),
            status: parse_stored_status(self.status)?,
        })
    }
}

fn parse_user_id(raw: &str) -> Result<UserId> {
    UserId::parse(raw).map_err(|e| StorageError::mapping(format!("invalid user_id {raw:?}: {e}")))
}

fn parse_stored_status(code: i32) -> Result<UserStatus> {
    match UserStatus::try_from(code) {
        Ok(status) if !status.is_unspecified() => Ok(status),
        _ => Err(StorageError::mapping(format!("invalid stored status: {code}"))),
    }
}

fn stored_from_sqlite(row: &SqliteRow) -> Result<StoredUser> {
    let user_id: String = row.try_get("user_id")?;
    let status: i32 = row.try_get("status")?;

    Ok(StoredUser {
        id: parse_user_id(&user_id)?,
        email: row.try_get("email")?,
        status: parse_stored_status(status)?,
    })
}

/// Busy or stale-snapshot errors mean another connection wrote first
fn write_error(id: UserId, err: sqlx::Error) -> StorageError {
    let busy = matches!(
        &err,
        sqlx::Error::Database(db) if matches!(db.code().as_deref(), Some("5" | "517"))
    );
    if busy {
        StorageError::Conflict(id)
    } else {
        StorageError::Database(err)
    }
}

/// Insert a new user and return the stored id, email and status
pub async fn create(pool: &SqlitePool, user: &User) -> Result<StoredUser> {
    let row = UserRow::from_user(user, 0)?;

    let inserted = sqlx::query(
        r#"
        INSERT INTO users (user_id, first_name, last_name, email, phone, age, status, version)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING user_id, email, status
        "#,
    )
    .bind(&row.user_id)
    .bind(&row.first_name)
    .bind(&row.last_name)
    .bind(&row.email)
    .bind(&row.phone)
    .bind(row.age)
    .bind(row.status)
    .bind(row.version)
    .fetch_one(pool)
    .await?;

    stored_from_sqlite(&inserted)
}

/// Get all users in insertion order
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query(SELECT_ALL)
        .fetch_all(pool)
        .await?;

    rows.iter()
        .map(|row| UserRow::from_sqlite(row)?.into_user())
        .collect()
}

/// Fetch the raw row for `id`, if any
pub async fn find_row<'e, E>(executor: E, id: UserId) -> Result<Option<UserRow>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query(SELECT_BY_ID)
        .bind(id.to_hyphenated())
        .fetch_optional(executor)
        .await?;

    row.as_ref().map(UserRow::from_sqlite).transpose()
}

/// Get a user by id
pub async fn get_by_id(pool: &SqlitePool, id: UserId) -> Result<User> {
    find_row(pool, id)
        .await?
        .ok_or(StorageError::NotFound(id))?
        .into_user()
}

/// Merge `patch` onto the stored user and write every column back
///
/// Runs in one transaction. The write only applies if the row still has
/// the version that was read; otherwise the update is reported as a
/// conflict rather than overwriting the other writer.
pub async fn update(pool: &SqlitePool, id: UserId, patch: &UserPatch) -> Result<StoredUser> {
    let mut tx = pool.begin().await?;

    let current = find_row(&mut *tx, id)
        .await?
        .ok_or(StorageError::NotFound(id))?;
    let version = current.version;
    let merged = merge(&current.into_user()?, patch);
    let row = UserRow::from_user(&merged, version)?;

    let written = sqlx::query(
        r#"
        UPDATE users
        SET first_name = ?, last_name = ?, email = ?, phone = ?, age = ?, status = ?,
            version = version + 1
        WHERE user_id = ? AND version = ?
        RETURNING user_id, email, status
        "#,
    )
    .bind(&row.first_name)
    .bind(&row.last_name)
    .bind(&row.email)
    .bind(&row.phone)
    .bind(row.age)
    .bind(row.status)
    .bind(&row.user_id)
    .bind(version)
    .fetch_optional(&mut *tx)
    .await
    .map_err(|e| write_error(id, e))?
    .ok_or(StorageError::Conflict(id))?;

    let stored = stored_from_sqlite(&written)?;
    tx.commit().await.map_err(|e| write_error(id, e))?;

    Ok(stored)
}

/// Hard-delete a user
pub async fn delete(pool: &SqlitePool, id: UserId) -> Result<UserId> {
    let result = sqlx::query("DELETE FROM users WHERE user_id = ?")
        .bind(id.to_hyphenated())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::NotFound(id));
    }

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: UserId::generate(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+441234567890".to_string(),
            age: 36,
            status: UserStatus::Inactive,
        }
    }

    #[test]
    fn row_mapping_roundtrip() {
        let user = sample_user();
        let row = UserRow::from_user(&user, 3).unwrap();

        assert_eq!(row.user_id, user.id.to_hyphenated());
        assert_eq!(row.status, 2);
        assert_eq!(row.age, 36);
        assert_eq!(row.version, 3);
        assert_eq!(row.into_user().unwrap(), user);
    }

    #[test]
    fn row_rejects_age_beyond_column_width() {
        let user = User {
            age: i64::from(i32::MAX) + 1,
            ..sample_user()
        };
        assert!(matches!(
            UserRow::from_user(&user, 0),
            Err(StorageError::Mapping(_))
        ));
    }

    #[test]
    fn row_rejects_unspecified_status() {
        let user = User {
            status: UserStatus::Unspecified,
            ..sample_user()
        };
        assert!(UserRow::from_user(&user, 0).is_err());
    }

    #[test]
    fn stored_row_with_bad_data_fails_mapping() {
        let mut row = UserRow::from_user(&sample_user(), 0).unwrap();
        row.status = 0;
        assert!(row.clone().into_user().is_err());

        row.status = 1;
        row.user_id = "not-a-uuid".to_string();
        assert!(row.into_user().is_err());
    }
}
