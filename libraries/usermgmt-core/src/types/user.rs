/// User domain types
use crate::types::UserId;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Lifecycle status of a user account
///
/// Travels as its integer code. `Unspecified` is the zero value: it never
/// appears on a stored user and means "not supplied" in payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum UserStatus {
    #[default]
    Unspecified,
    Active,
    Inactive,
}

/// Status code outside the known range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown user status code: {0}")]
pub struct InvalidStatus(pub i64);

impl UserStatus {
    /// Integer code used on the wire and in storage
    pub fn code(self) -> i32 {
        match self {
            UserStatus::Unspecified => 0,
            UserStatus::Active => 1,
            UserStatus::Inactive => 2,
        }
    }

    /// Look up a status by its code
    pub fn from_code(code: i64) -> Result<Self, InvalidStatus> {
        match code {
            0 => Ok(UserStatus::Unspecified),
            1 => Ok(UserStatus::Active),
            2 => Ok(UserStatus::Inactive),
            other => Err(InvalidStatus(other)),
        }
    }

    pub fn is_unspecified(self) -> bool {
        self == UserStatus::Unspecified
    }

    /// Resolve the zero value to the creation default
    pub fn or_active(self) -> Self {
        if self.is_unspecified() {
            UserStatus::Active
        } else {
            self
        }
    }
}

impl From<UserStatus> for i32 {
    fn from(status: UserStatus) -> Self {
        status.code()
    }
}

impl TryFrom<i32> for UserStatus {
    type Error = InvalidStatus;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(i64::from(code))
    }
}

/// User account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier
    #[serde(rename = "userId")]
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub age: i64,
    pub status: UserStatus,
}

/// Fields returned by a write: what a caller needs to confirm it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    pub id: UserId,
    pub email: String,
    pub status: UserStatus,
}

/// An explicit `null` reads the same as an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Create request body
///
/// Missing or `null` fields decode to their zero value so the validation engine can
/// report every one of them instead of failing on the first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateUser {
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub age: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub status: i64,
}

/// Update request body; zero or `null` values mean "leave unchanged"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateUser {
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub age: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub status: i64,
}

/// A create payload that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub age: i64,
    pub status: UserStatus,
}

impl NewUser {
    /// Build the entity under a freshly assigned id
    ///
    /// An unspecified status becomes `Active`.
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            age: self.age,
            status: self.status.or_active(),
        }
    }
}

/// An update payload that passed validation
///
/// Empty strings, a zero age and `Unspecified` status are "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub age: i64,
    pub status: UserStatus,
}

impl UserPatch {
    /// True when no field is supplied
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_user() -> User {
        User {
            id: UserId::generate(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+441234567890".to_string(),
            age: 36,
            status: UserStatus::Active,
        }
    }

    #[test]
    fn status_codes_roundtrip() {
        for status in [
            UserStatus::Unspecified,
            UserStatus::Active,
            UserStatus::Inactive,
        ] {
            assert_eq!(UserStatus::from_code(i64::from(status.code())), Ok(status));
        }
        assert_eq!(UserStatus::from_code(3), Err(InvalidStatus(3)));
        assert_eq!(UserStatus::from_code(-1), Err(InvalidStatus(-1)));
    }

    #[test]
    fn unspecified_status_resolves_to_active() {
        assert_eq!(UserStatus::Unspecified.or_active(), UserStatus::Active);
        assert_eq!(UserStatus::Inactive.or_active(), UserStatus::Inactive);
    }

    #[test]
    fn user_serializes_with_camel_case_and_numeric_status() {
        let user = sample_user();
        let value = serde_json::to_value(&user).unwrap();

        assert_eq!(value["userId"], json!(user.id.to_string()));
        assert_eq!(value["firstName"], json!("Ada"));
        assert_eq!(value["lastName"], json!("Lovelace"));
        assert_eq!(value["status"], json!(1));
        assert_eq!(value["age"], json!(36));
    }

    #[test]
    fn create_payload_defaults_missing_fields() {
        let payload: CreateUser = serde_json::from_value(json!({ "email": "x" })).unwrap();
        assert_eq!(payload.email, "x");
        assert!(payload.first_name.is_empty());
        assert_eq!(payload.age, 0);
        assert_eq!(payload.status, 0);
    }

    #[test]
    fn null_fields_decode_as_zero_values() {
        let payload: CreateUser = serde_json::from_value(json!({
            "firstName": "ss",
            "status": null,
            "age": null
        }))
        .unwrap();
        assert_eq!(payload.first_name, "ss");
        assert_eq!(payload.status, 0);
        assert_eq!(payload.age, 0);

        let payload: UpdateUser =
            serde_json::from_value(json!({ "firstName": null, "email": "a@b.co" })).unwrap();
        assert!(payload.first_name.is_empty());
        assert_eq!(payload.email, "a@b.co");
    }

    #[test]
    fn wrongly_typed_fields_still_fail_to_decode() {
        let result: Result<UpdateUser, _> = serde_json::from_value(json!({ "age": "old" }));
        assert!(result.is_err());
    }

    #[test]
    fn new_user_gets_id_and_default_status() {
        let id = UserId::generate();
        let user = NewUser {
            first_name: "ss".to_string(),
            last_name: "ss".to_string(),
            email: "s@gmail.com".to_string(),
            phone: "+94776463619".to_string(),
            age: 2,
            status: UserStatus::Unspecified,
        }
        .into_user(id);

        assert_eq!(user.id, id);
        assert_eq!(user.status, UserStatus::Active);
    }

    #[test]
    fn empty_patch_detection() {
        assert!(UserPatch::default().is_empty());
        let patch = UserPatch {
            age: 5,
            ..UserPatch::default()
        };
        assert!(!patch.is_empty());
    }
}
