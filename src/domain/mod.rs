//! Domain layer - Core business entities and logic
//!
//! Contains the core domain models and the request/response shapes that
//! represent them at the API boundary, independent of infrastructure.

pub mod password;
pub mod user;

pub use password::Password;
pub use user::{ChangePasswordRequest, SignUpRequest, User, UserResponse, UserRole};
