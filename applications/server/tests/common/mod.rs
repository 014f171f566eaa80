/// Common test utilities and fixtures
use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use serde_json::Value;
use std::{sync::Arc, time::Duration};
use tempfile::TempDir;
use usermgmt_core::UserValidator;
use usermgmt_server::{api, services::UserService, state::AppState};
use usermgmt_storage::SqliteUserRepository;

/// Router backed by a fresh file-backed database
///
/// Keep the `TempDir` alive for as long as the router is used.
pub async fn create_test_app() -> (Router, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("users.db");
    let url = format!("sqlite://{}", db_path.display());

    let repo = SqliteUserRepository::connect(&url, 5).await.unwrap();
    let users = UserService::new(Arc::new(repo), UserValidator::new().unwrap());
    let app = api::router(AppState::new(Arc::new(users)), Duration::from_secs(10));

    (app, temp_dir)
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub mod fixtures {
    use serde_json::{json, Value};

    pub fn valid_user() -> Value {
        json!({
            "firstName": "ss",
            "lastName": "ss",
            "email": "s@gmail.com",
            "phone": "+94776463619",
            "age": 2,
            "status": 1
        })
    }
}
