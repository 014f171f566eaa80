/// API route modules
pub mod health;
pub mod users;

use crate::{error::ServerError, state::AppState};
use axum::{error_handling::HandleErrorLayer, routing::get, BoxError, Router};
use std::time::Duration;
use tower::{timeout::error::Elapsed, timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the HTTP router
///
/// Requests that outlive `request_timeout` are answered with a 408 error body.
pub fn router(app_state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

async fn handle_middleware_error(err: BoxError) -> ServerError {
    if err.is::<Elapsed>() {
        tracing::warn!("Request exceeded deadline");
        ServerError::Timeout
    } else {
        ServerError::Internal(err.to_string())
    }
}
