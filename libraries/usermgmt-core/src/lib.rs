//! User Management Core
//!
//! Storage-agnostic domain types, validation and merge rules for the user
//! resource.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `UserId`, `UserStatus` and the request payloads
//! - **Validation**: `UserValidator`, the create/update field rules
//! - **Merge**: how a partial update overlays a stored user
//! - **Repository**: the `UserRepository` capability trait
//! - **Error Handling**: `UserError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use usermgmt_core::{merge, CreateUser, UpdateUser, UserId, UserValidator};
//!
//! let validator = UserValidator::new().unwrap();
//! let payload = CreateUser {
//!     first_name: "Ada".to_string(),
//!     last_name: "Lovelace".to_string(),
//!     email: "ada@example.com".to_string(),
//!     phone: "+441234567890".to_string(),
//!     age: 36,
//!     status: 0,
//! };
//! let user = validator.validate_create(&payload).unwrap().into_user(UserId::generate());
//!
//! let patch = validator
//!     .validate_update(&UpdateUser { age: 37, ..UpdateUser::default() })
//!     .unwrap();
//! assert_eq!(merge(&user, &patch).age, 37);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod merge;
pub mod repository;
pub mod types;
pub mod validation;

pub use error::{Result, UserError};
pub use merge::merge;
pub use repository::UserRepository;
pub use validation::{FieldViolation, UserValidator, ValidationError};

pub use types::{
    CreateUser, InvalidStatus, NewUser, StoredUser, UpdateUser, User, UserId, UserPatch,
    UserStatus,
};
