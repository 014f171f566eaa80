//! User Management Server Library
//!
//! HTTP service exposing create/read/update/delete for the user resource.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use api::router;
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::UserService;
pub use state::AppState;
