//! User manager handlers.
//!
//! The `/api/manager` surface: profile update, password change, delete,
//! lookup by username or id, the admin listing, and token introspection.

use axum::{
    extract::{Extension, Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware,
    response::{IntoResponse, Json, Response},
    routing::{delete, get, put},
    Router,
};
use serde::Deserialize;

use crate::api::extractors::ValidatedJson;
use crate::api::headers::{error_read, success_read};
use crate::api::middleware::{
    auth_middleware, require_admin, require_any_role, require_self_or_admin,
    require_self_or_admin_by_username, require_user, CurrentUser,
};
use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::{ChangePasswordRequest, SignUpRequest, UserResponse};
use crate::errors::{AppError, AppResult};
use crate::types::{ListParams, MessageResponse, Paginated};

/// Query parameter for the username lookup
#[derive(Debug, Deserialize)]
pub struct UsernameQuery {
    pub username: String,
}

/// Create the manager routes. Every route except `/info` sits behind the
/// JWT middleware; `/info` authenticates through the bearer token itself.
pub fn manager_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/update/:id", put(update_user))
        .route("/change-password", put(change_password))
        .route("/delete/:id", delete(delete_user))
        .route("/user", get(get_by_username))
        .route("/user/:id", get(get_by_id))
        .route("/all", get(list_all))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
        .route("/info", get(get_info))
}

/// Update a user's profile
#[utoipa::path(
    put,
    path = "/api/manager/update/{id}",
    tag = "Manager",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = SignUpRequest,
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 400, description = "Update failed", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires the user role")
    )
)]
pub async fn update_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<SignUpRequest>,
) -> AppResult<Json<MessageResponse>> {
    require_user(&current_user)?;

    let username = payload.username.clone();
    match state.user_service.update(id, payload).await {
        Ok(_) => Ok(Json(MessageResponse::new(format!(
            "Update user: {} successfully.",
            username
        )))),
        // Any upstream failure surfaces as a 400 carrying the error text
        Err(error) => Err(AppError::bad_request(format!(
            "Update user failed: {}",
            error
        ))),
    }
}

/// Change the caller's password
#[utoipa::path(
    put,
    path = "/api/manager/change-password",
    tag = "Manager",
    security(("bearer_auth" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed, confirmation text", body = String),
        (status = 400, description = "Old password incorrect or validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires the user role")
    )
)]
pub async fn change_password(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> AppResult<String> {
    require_user(&current_user)?;

    // A user may only rotate their own password
    if request.username != current_user.username {
        return Err(AppError::Forbidden);
    }

    state.user_service.change_password(request).await
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/manager/delete/{id}",
    tag = "Manager",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted, confirmation text", body = String),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<String> {
    require_any_role(&current_user)?;

    state.user_service.delete(id).await
}

/// Look up a user by username (own profile, or any profile for admins)
#[utoipa::path(
    get,
    path = "/api/manager/user",
    tag = "Manager",
    security(("bearer_auth" = [])),
    params(
        ("username" = String, Query, description = "Login name to look up")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not your username"),
        (status = 404, description = "No such user, empty body")
    )
)]
pub async fn get_by_username(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<UsernameQuery>,
) -> AppResult<Response> {
    require_self_or_admin_by_username(&current_user, &query.username)?;

    match state.user_service.find_by_username(&query.username).await? {
        Some(user) => Ok((success_read(), Json(UserResponse::from(user))).into_response()),
        None => Ok((StatusCode::NOT_FOUND, error_read()).into_response()),
    }
}

/// Look up a user by id (own profile, or any profile for admins)
#[utoipa::path(
    get,
    path = "/api/manager/user/{id}",
    tag = "Manager",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not your id"),
        (status = 404, description = "No such user, empty body")
    )
)]
pub async fn get_by_id(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    require_self_or_admin(&current_user, id)?;

    match state.user_service.find_by_id(id).await? {
        Some(user) => Ok((success_read(), Json(UserResponse::from(user))).into_response()),
        None => Ok((StatusCode::NOT_FOUND, error_read()).into_response()),
    }
}

/// List all users, paged and sorted (admin only)
#[utoipa::path(
    get,
    path = "/api/manager/all",
    tag = "Manager",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<u64>, Query, description = "0-indexed page, default 0"),
        ("size" = Option<u64>, Query, description = "Page size, default 10"),
        ("sortBy" = Option<String>, Query, description = "Sort field, default id"),
        ("sortOrder" = Option<String>, Query, description = "ASC or DESC, default ASC")
    ),
    responses(
        (status = 200, description = "One page of users with pagination metadata"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only")
    )
)]
pub async fn list_all(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Response> {
    require_admin(&current_user)?;

    let (users, total) = state.user_service.find_all_users(&params).await?;
    let data: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    let page = Paginated::new(data, params.page, params.limit(), total);

    Ok((success_read(), Json(page)).into_response())
}

/// Resolve the caller's profile from their bearer token
#[utoipa::path(
    get,
    path = "/api/manager/info",
    tag = "Manager",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile of the token's subject", body = UserResponse),
        (status = 401, description = "Missing/invalid token, or its subject has no user")
    )
)]
pub async fn get_info(
    State(state): State<AppState>,
    request_headers: HeaderMap,
) -> AppResult<Response> {
    let auth_header = request_headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let username = state.auth_service.username_from_token(token)?;

    match state.user_service.find_by_username(&username).await? {
        Some(user) => Ok((success_read(), Json(UserResponse::from(user))).into_response()),
        // The token verified but its subject is gone
        None => Err(AppError::TokenAccess),
    }
}
