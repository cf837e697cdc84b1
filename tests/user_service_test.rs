//! User service unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;
use mockall::predicate::eq;

use user_manager::domain::{ChangePasswordRequest, Password, SignUpRequest, User, UserRole};
use user_manager::errors::{AppError, AppResult};
use user_manager::infra::{UserData, UserRepository};
use user_manager::services::{UserManager, UserService};
use user_manager::types::ListParams;

mock! {
    UserRepo {}

    #[async_trait]
    impl UserRepository for UserRepo {
        async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;
        async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;
        async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
        async fn create(&self, data: UserData) -> AppResult<User>;
        async fn update(&self, id: i64, data: UserData) -> AppResult<User>;
        async fn update_password(&self, id: i64, password_hash: String) -> AppResult<()>;
        async fn delete(&self, id: i64) -> AppResult<()>;
        async fn find_page(&self, params: &ListParams) -> AppResult<(Vec<User>, u64)>;
    }
}

fn test_user(id: i64, username: &str) -> User {
    User {
        id,
        username: username.to_string(),
        fullname: "Test User".to_string(),
        email: format!("{}@example.com", username),
        phone: "+84123456789".to_string(),
        gender: "male".to_string(),
        password_hash: "hashed".to_string(),
        role: UserRole::User,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn update_payload(username: &str) -> SignUpRequest {
    SignUpRequest {
        username: username.to_string(),
        password: "SecurePass123!".to_string(),
        fullname: "Test User".to_string(),
        email: format!("{}@example.com", username),
        phone: "+84123456789".to_string(),
        gender: "male".to_string(),
    }
}

fn service(repo: MockUserRepo) -> UserManager {
    UserManager::new(Arc::new(repo))
}

#[tokio::test]
async fn update_overwrites_profile() {
    let mut repo = MockUserRepo::new();
    repo.expect_find_by_id()
        .with(eq(7))
        .returning(|id| Ok(Some(test_user(id, "alice"))));
    repo.expect_update()
        .withf(|id, data| *id == 7 && data.username == "alice" && data.password_hash != "SecurePass123!")
        .returning(|id, data| {
            let mut user = test_user(id, &data.username);
            user.password_hash = data.password_hash;
            Ok(user)
        });

    let result = service(repo).update(7, update_payload("alice")).await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().username, "alice");
}

#[tokio::test]
async fn update_missing_user_is_not_found() {
    let mut repo = MockUserRepo::new();
    repo.expect_find_by_id().returning(|_| Ok(None));

    let result = service(repo).update(999, update_payload("alice")).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn update_rejects_taken_username() {
    let mut repo = MockUserRepo::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(test_user(id, "alice"))));
    // The new username already belongs to someone else
    repo.expect_find_by_username()
        .withf(|name| name == "bob")
        .returning(|name| Ok(Some(test_user(99, name))));

    let mut payload = update_payload("bob");
    payload.email = "alice@example.com".to_string();
    let result = service(repo).update(7, payload).await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn update_rejects_taken_email() {
    let mut repo = MockUserRepo::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(test_user(id, "alice"))));
    repo.expect_find_by_email()
        .withf(|email| email == "new@example.com")
        .returning(|_| Ok(Some(test_user(99, "stranger"))));

    let mut payload = update_payload("alice");
    payload.email = "new@example.com".to_string();
    let result = service(repo).update(7, payload).await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn change_password_verifies_old_password() {
    let old_hash = Password::new("OldPass123!").unwrap().into_string();

    let mut repo = MockUserRepo::new();
    repo.expect_find_by_username()
        .withf(|name| name == "alice")
        .returning(move |name| {
            let mut user = test_user(7, name);
            user.password_hash = old_hash.clone();
            Ok(Some(user))
        });
    repo.expect_update_password()
        .withf(|id, hash| *id == 7 && !hash.is_empty())
        .returning(|_, _| Ok(()));

    let message = service(repo)
        .change_password(ChangePasswordRequest {
            username: "alice".to_string(),
            old_password: "OldPass123!".to_string(),
            new_password: "NewPass456!".to_string(),
        })
        .await
        .unwrap();

    assert!(message.contains("alice"));
}

#[tokio::test]
async fn change_password_rejects_wrong_old_password() {
    let old_hash = Password::new("OldPass123!").unwrap().into_string();

    let mut repo = MockUserRepo::new();
    repo.expect_find_by_username().returning(move |name| {
        let mut user = test_user(7, name);
        user.password_hash = old_hash.clone();
        Ok(Some(user))
    });
    // update_password must never be reached
    repo.expect_update_password().never();

    let result = service(repo)
        .change_password(ChangePasswordRequest {
            username: "alice".to_string(),
            old_password: "WrongPass000!".to_string(),
            new_password: "NewPass456!".to_string(),
        })
        .await;

    assert!(matches!(result.unwrap_err(), AppError::BadRequest(_)));
}

#[tokio::test]
async fn change_password_for_unknown_user_is_not_found() {
    let mut repo = MockUserRepo::new();
    repo.expect_find_by_username().returning(|_| Ok(None));

    let result = service(repo)
        .change_password(ChangePasswordRequest {
            username: "ghost".to_string(),
            old_password: "OldPass123!".to_string(),
            new_password: "NewPass456!".to_string(),
        })
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn delete_returns_confirmation() {
    let mut repo = MockUserRepo::new();
    repo.expect_delete().with(eq(5)).returning(|_| Ok(()));

    let message = service(repo).delete(5).await.unwrap();

    assert_eq!(message, "Deleted user with id: 5 successfully.");
}

#[tokio::test]
async fn delete_propagates_not_found() {
    let mut repo = MockUserRepo::new();
    repo.expect_delete().returning(|_| Err(AppError::NotFound));

    let result = service(repo).delete(5).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn lookups_pass_absence_through() {
    let mut repo = MockUserRepo::new();
    repo.expect_find_by_username()
        .withf(|name| name == "ghost")
        .returning(|_| Ok(None));
    repo.expect_find_by_id().with(eq(404)).returning(|_| Ok(None));

    let svc = service(repo);
    assert!(svc.find_by_username("ghost").await.unwrap().is_none());
    assert!(svc.find_by_id(404).await.unwrap().is_none());
}

#[tokio::test]
async fn listing_forwards_parameters() {
    let mut repo = MockUserRepo::new();
    repo.expect_find_page()
        .withf(|params| {
            params.page == 0
                && params.size == 10
                && params.sort_by == "id"
                && params.sort_order == "ASC"
        })
        .returning(|_| Ok((vec![test_user(1, "a"), test_user(2, "b")], 12)));

    let (users, total) = service(repo)
        .find_all_users(&ListParams::default())
        .await
        .unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(total, 12);
}
