//! API middleware.

mod auth;

pub use auth::{
    auth_middleware, require_admin, require_any_role, require_self_or_admin,
    require_self_or_admin_by_username, require_user, CurrentUser,
};
