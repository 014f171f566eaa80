mod ids;
mod user;

pub use ids::UserId;
pub use user::{
    CreateUser, InvalidStatus, NewUser, StoredUser, UpdateUser, User, UserPatch, UserStatus,
};
