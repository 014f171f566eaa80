/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use usermgmt_core::{UserError, UserId, ValidationError};

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid request body: {0}")]
    Decode(String),

    #[error("Invalid user id: {0}")]
    InvalidId(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("User not found: {0}")]
    NotFound(UserId),

    #[error("User was modified concurrently: {0}")]
    Conflict(UserId),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<UserError> for ServerError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(e) => ServerError::Validation(e),
            UserError::NotFound(id) => ServerError::NotFound(id),
            UserError::Conflict(id) => ServerError::Conflict(id),
            UserError::Storage(msg) => ServerError::Storage(msg),
        }
    }
}

/// Body of every error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub errors: String,
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Decode(_) | ServerError::InvalidId(_) | ServerError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Conflict(_) => StatusCode::CONFLICT,
            ServerError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ServerError::Storage(_) | ServerError::Config(_) | ServerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn body(&self) -> ErrorBody {
        let (message, errors) = match self {
            ServerError::Decode(detail) => ("invalid request body", detail.clone()),
            ServerError::InvalidId(detail) => ("invalid user id", detail.clone()),
            ServerError::Validation(e) => ("validation failed", e.summary()),
            ServerError::NotFound(id) => ("user not found", format!("no user with id {}", id)),
            ServerError::Conflict(id) => (
                "user was modified concurrently",
                format!("user {} changed while the update was applied; retry", id),
            ),
            ServerError::Timeout => (
                "request timed out",
                "the request did not complete before the server deadline".to_string(),
            ),
            ServerError::Storage(msg) => {
                tracing::error!("Storage error: {}", msg);
                ("internal server error", "storage failure".to_string())
            }
            ServerError::Config(msg) => {
                tracing::error!("Config error: {}", msg);
                ("internal server error", "configuration error".to_string())
            }
            ServerError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ("internal server error", "unexpected failure".to_string())
            }
        };

        ErrorBody {
            message: message.to_string(),
            errors,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.body())).into_response()
    }
}
