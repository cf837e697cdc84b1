//! User service - user-management business logic.
//!
//! Mirrors the manager endpoint surface: profile update, password change,
//! delete, the two lookups and the paged listing.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{ChangePasswordRequest, Password, SignUpRequest, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{UserData, UserRepository};
use crate::types::ListParams;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Overwrite the profile of the user with the given id.
    /// The payload is the full registration shape, password included.
    async fn update(&self, id: i64, payload: SignUpRequest) -> AppResult<User>;

    /// Rotate a user's password after verifying the current one.
    /// Returns a confirmation message.
    async fn change_password(&self, request: ChangePasswordRequest) -> AppResult<String>;

    /// Delete a user. Returns a confirmation message.
    async fn delete(&self, id: i64) -> AppResult<String>;

    /// Look up a user by login name. Absence is not an error.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Look up a user by id. Absence is not an error.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Fetch one sorted page of users plus the total count.
    async fn find_all_users(&self, params: &ListParams) -> AppResult<(Vec<User>, u64)>;
}

/// Concrete implementation of [`UserService`].
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Reject a username/email that already belongs to a different user.
    async fn ensure_identity_free(
        &self,
        payload: &SignUpRequest,
        current: &User,
    ) -> AppResult<()> {
        if payload.username != current.username {
            if let Some(other) = self.repo.find_by_username(&payload.username).await? {
                if other.id != current.id {
                    return Err(AppError::conflict("Username"));
                }
            }
        }

        if payload.email != current.email {
            if let Some(other) = self.repo.find_by_email(&payload.email).await? {
                if other.id != current.id {
                    return Err(AppError::conflict("Email"));
                }
            }
        }

        Ok(())
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn update(&self, id: i64, payload: SignUpRequest) -> AppResult<User> {
        let current = self.repo.find_by_id(id).await?.ok_or_not_found()?;

        self.ensure_identity_free(&payload, &current).await?;

        let password_hash = Password::new(&payload.password)?.into_string();
        let user = self
            .repo
            .update(
                id,
                UserData {
                    username: payload.username,
                    fullname: payload.fullname,
                    email: payload.email,
                    phone: payload.phone,
                    gender: payload.gender,
                    password_hash,
                },
            )
            .await?;

        tracing::info!(user_id = id, "User profile updated");
        Ok(user)
    }

    async fn change_password(&self, request: ChangePasswordRequest) -> AppResult<String> {
        let user = self
            .repo
            .find_by_username(&request.username)
            .await?
            .ok_or_not_found()?;

        let stored = Password::from_hash(user.password_hash.clone());
        if !stored.verify(&request.old_password) {
            return Err(AppError::bad_request("Old password is incorrect"));
        }

        let new_hash = Password::new(&request.new_password)?.into_string();
        self.repo.update_password(user.id, new_hash).await?;

        tracing::info!(user_id = user.id, "Password changed");
        Ok(format!(
            "Changed password for user: {} successfully.",
            user.username
        ))
    }

    async fn delete(&self, id: i64) -> AppResult<String> {
        self.repo.delete(id).await?;

        tracing::info!(user_id = id, "User deleted");
        Ok(format!("Deleted user with id: {} successfully.", id))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.repo.find_by_username(username).await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        self.repo.find_by_id(id).await
    }

    async fn find_all_users(&self, params: &ListParams) -> AppResult<(Vec<User>, u64)> {
        self.repo.find_page(params).await
    }
}
