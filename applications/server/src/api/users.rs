/// Users API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use usermgmt_core::{CreateUser, StoredUser, UpdateUser, User, UserId, UserStatus};

/// Body returned by create and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWriteResponse {
    pub user_id: UserId,
    pub email: String,
    pub status: UserStatus,
}

impl From<StoredUser> for UserWriteResponse {
    fn from(stored: StoredUser) -> Self {
        Self {
            user_id: stored.id,
            email: stored.email,
            status: stored.status,
        }
    }
}

fn parse_id(raw: &str) -> Result<UserId> {
    UserId::parse(raw).map_err(|e| ServerError::InvalidId(format!("{raw:?}: {e}")))
}

fn decode<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    body.map(|Json(payload)| payload)
        .map_err(|rejection| ServerError::Decode(rejection.body_text()))
}

/// POST /users
pub async fn create_user(
    State(app_state): State<AppState>,
    body: std::result::Result<Json<CreateUser>, JsonRejection>,
) -> Result<(StatusCode, Json<UserWriteResponse>)> {
    let payload = decode(body)?;
    let stored = app_state.users.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(stored.into())))
}

/// GET /users
/// Every stored user in insertion order
pub async fn list_users(State(app_state): State<AppState>) -> Result<Json<Vec<User>>> {
    let users = app_state.users.list().await?;
    Ok(Json(users))
}

/// GET /users/:id
pub async fn get_user(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<User>> {
    let user_id = parse_id(&id)?;
    let user = app_state.users.get(user_id).await?;
    Ok(Json(user))
}

/// PUT /users/:id
/// Partial update; omitted or zero-valued fields keep their stored value
pub async fn update_user(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    body: std::result::Result<Json<UpdateUser>, JsonRejection>,
) -> Result<Json<UserWriteResponse>> {
    let user_id = parse_id(&id)?;
    let payload = decode(body)?;
    let stored = app_state.users.update(user_id, &payload).await?;
    Ok(Json(stored.into()))
}

/// DELETE /users/:id
pub async fn delete_user(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<StatusCode> {
    let user_id = parse_id(&id)?;
    app_state.users.delete(user_id).await?;
    Ok(StatusCode::ACCEPTED)
}
