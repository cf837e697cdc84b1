//! User repository - persistence for the users aggregate.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::entities::user::{ActiveModel, Column, Entity as UserEntity};
use crate::config::ROLE_USER;
use crate::domain::User;
use crate::errors::{AppError, AppResult};
use crate::types::ListParams;

/// Write payload shared by create and update. Profile updates resubmit the
/// full registration shape, so both operations carry the same fields.
#[derive(Debug, Clone)]
pub struct UserData {
    pub username: String,
    pub fullname: String,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub password_hash: String,
}

/// User repository trait for dependency injection.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by primary key
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Find user by login name
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a new user with the default role
    async fn create(&self, data: UserData) -> AppResult<User>;

    /// Overwrite profile fields of an existing user
    async fn update(&self, id: i64, data: UserData) -> AppResult<User>;

    /// Replace the stored password hash
    async fn update_password(&self, id: i64, password_hash: String) -> AppResult<()>;

    /// Delete user by primary key
    async fn delete(&self, id: i64) -> AppResult<()>;

    /// Fetch one sorted page of users plus the total row count
    async fn find_page(&self, params: &ListParams) -> AppResult<(Vec<User>, u64)>;
}

/// SeaORM-backed implementation of [`UserRepository`].
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Map a public sort field name onto an entity column.
/// Unknown names fall back to the primary key so the listing stays total.
fn sort_column(field: &str) -> Column {
    match field {
        "username" => Column::Username,
        "fullname" => Column::Fullname,
        "email" => Column::Email,
        "created_at" => Column::CreatedAt,
        _ => Column::Id,
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await?;
        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(result.map(User::from))
    }

    async fn create(&self, data: UserData) -> AppResult<User> {
        let now = Utc::now();
        let active_model = ActiveModel {
            username: Set(data.username),
            fullname: Set(data.fullname),
            email: Set(data.email),
            phone: Set(data.phone),
            gender: Set(data.gender),
            password_hash: Set(data.password_hash),
            role: Set(ROLE_USER.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Ok(User::from(model))
    }

    async fn update(&self, id: i64, data: UserData) -> AppResult<User> {
        let model = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();
        active.username = Set(data.username);
        active.fullname = Set(data.fullname);
        active.email = Set(data.email);
        active.phone = Set(data.phone);
        active.gender = Set(data.gender);
        active.password_hash = Set(data.password_hash);
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(User::from(model))
    }

    async fn update_password(&self, id: i64, password_hash: String) -> AppResult<()> {
        let model = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();
        active.password_hash = Set(password_hash);
        active.updated_at = Set(Utc::now());

        active.update(&self.db).await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn find_page(&self, params: &ListParams) -> AppResult<(Vec<User>, u64)> {
        let order = if params.descending() {
            Order::Desc
        } else {
            Order::Asc
        };

        let paginator = UserEntity::find()
            .order_by(sort_column(&params.sort_by), order)
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page).await?;

        Ok((models.into_iter().map(User::from).collect(), total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_sort_field_falls_back_to_id() {
        assert!(matches!(sort_column("no_such_column"), Column::Id));
        assert!(matches!(sort_column("username"), Column::Username));
        assert!(matches!(sort_column("created_at"), Column::CreatedAt));
    }
}
