//! JWT authentication middleware and per-route authorization guards.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::{BEARER_TOKEN_PREFIX, ROLE_ADMIN, ROLE_USER};
use crate::errors::AppError;

/// Authenticated user extracted from JWT token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub role: String,
}

impl CurrentUser {
    /// Check if user has admin role.
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// Check if user holds the plain user role.
    pub fn is_user(&self) -> bool {
        self.role == ROLE_USER
    }
}

/// JWT authentication middleware.
///
/// Extracts and validates the JWT token from the Authorization header,
/// then injects the CurrentUser into the request extensions. Runs before
/// any guarded handler, so unauthenticated requests never reach one.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(token)?;

    let current_user = CurrentUser {
        id: claims.uid,
        username: claims.sub,
        role: claims.role,
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Require the plain user role. Note this is a literal role check:
/// admins do not pass it.
pub fn require_user(user: &CurrentUser) -> Result<(), AppError> {
    if user.is_user() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Require the admin role.
pub fn require_admin(user: &CurrentUser) -> Result<(), AppError> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Require any recognized role.
pub fn require_any_role(user: &CurrentUser) -> Result<(), AppError> {
    if user.is_user() || user.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Require the caller to be an admin, or a plain user whose id matches.
pub fn require_self_or_admin(user: &CurrentUser, id: i64) -> Result<(), AppError> {
    if user.is_admin() || (user.is_user() && user.id == id) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Require the caller to be an admin, or a plain user whose username matches.
pub fn require_self_or_admin_by_username(
    user: &CurrentUser,
    username: &str,
) -> Result<(), AppError> {
    if user.is_admin() || (user.is_user() && user.username == username) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_user() -> CurrentUser {
        CurrentUser {
            id: 42,
            username: "alice".into(),
            role: "user".into(),
        }
    }

    fn admin() -> CurrentUser {
        CurrentUser {
            id: 1,
            username: "root".into(),
            role: "admin".into(),
        }
    }

    #[test]
    fn user_guard_is_a_literal_role_check() {
        assert!(require_user(&plain_user()).is_ok());
        assert!(require_user(&admin()).is_err());
    }

    #[test]
    fn admin_guard() {
        assert!(require_admin(&admin()).is_ok());
        assert!(require_admin(&plain_user()).is_err());
    }

    #[test]
    fn any_role_guard_rejects_unknown_roles() {
        assert!(require_any_role(&plain_user()).is_ok());
        assert!(require_any_role(&admin()).is_ok());

        let stranger = CurrentUser {
            id: 9,
            username: "eve".into(),
            role: "auditor".into(),
        };
        assert!(require_any_role(&stranger).is_err());
    }

    #[test]
    fn self_or_admin_by_id() {
        assert!(require_self_or_admin(&plain_user(), 42).is_ok());
        assert!(require_self_or_admin(&plain_user(), 43).is_err());
        assert!(require_self_or_admin(&admin(), 43).is_ok());
    }

    #[test]
    fn self_or_admin_by_username() {
        assert!(require_self_or_admin_by_username(&plain_user(), "alice").is_ok());
        assert!(require_self_or_admin_by_username(&plain_user(), "bob").is_err());
        assert!(require_self_or_admin_by_username(&admin(), "bob").is_ok());
    }
}
