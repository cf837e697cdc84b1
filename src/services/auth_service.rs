//! Authentication service - registration, login and token handling.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{Password, SignUpRequest, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{UserData, UserRepository};

/// JWT claims payload. The subject is the username.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub uid: i64,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user
    async fn sign_up(&self, payload: SignUpRequest) -> AppResult<User>;

    /// Verify credentials and return a bearer token
    async fn sign_in(&self, username: String, password: String) -> AppResult<TokenResponse>;

    /// Verify a JWT token and extract its claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Extract the subject username from a bearer token
    fn username_from_token(&self, token: &str) -> AppResult<String> {
        Ok(self.verify_token(token)?.sub)
    }
}

/// Generate a JWT token for a user
fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.username.clone(),
        uid: user.id,
        role: user.role.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Verify a JWT token and extract claims
fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of [`AuthService`].
pub struct Authenticator {
    repo: Arc<dyn UserRepository>,
    config: Config,
}

impl Authenticator {
    pub fn new(repo: Arc<dyn UserRepository>, config: Config) -> Self {
        Self { repo, config }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn sign_up(&self, payload: SignUpRequest) -> AppResult<User> {
        // Field formats are validated by the handler's ValidatedJson extractor
        if self
            .repo
            .find_by_username(&payload.username)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Username"));
        }
        if self.repo.find_by_email(&payload.email).await?.is_some() {
            return Err(AppError::conflict("Email"));
        }

        let password_hash = Password::new(&payload.password)?.into_string();
        let user = self
            .repo
            .create(UserData {
                username: payload.username,
                fullname: payload.fullname,
                email: payload.email,
                phone: payload.phone,
                gender: payload.gender,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, "User registered");
        Ok(user)
    }

    async fn sign_in(&self, username: String, password: String) -> AppResult<TokenResponse> {
        let user_result = self.repo.find_by_username(&username).await?;

        // Verify against a dummy hash when the user is absent so response
        // timing does not reveal which usernames exist.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let (password_hash, user_exists) = match &user_result {
            Some(user) => (user.password_hash.as_str(), true),
            None => (dummy_hash, false),
        };

        let stored_password = Password::from_hash(password_hash.to_string());
        let password_valid = stored_password.verify(&password);

        if !user_exists || !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        // Safe to unwrap since we verified user_exists is true
        generate_token(user_result.as_ref().unwrap(), &self.config)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;

    fn sample_user() -> User {
        User {
            id: 7,
            username: "jdoe".into(),
            fullname: "John Doe".into(),
            email: "jdoe@example.com".into(),
            phone: "123".into(),
            gender: "male".into(),
            password_hash: "unused".into(),
            role: UserRole::Admin,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn issued_token_verifies_and_carries_identity() {
        let config = Config::with_secret("test-secret-key-for-testing-only-32chars");
        let token = generate_token(&sample_user(), &config).unwrap();

        assert_eq!(token.token_type, "Bearer");

        let claims = verify_token_internal(&token.access_token, &config).unwrap();
        assert_eq!(claims.sub, "jdoe");
        assert_eq!(claims.uid, 7);
        assert_eq!(claims.role, "admin");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let config = Config::with_secret("test-secret-key-for-testing-only-32chars");
        let other = Config::with_secret("another-secret-key-of-enough-length!");

        let token = generate_token(&sample_user(), &config).unwrap();
        let result = verify_token_internal(&token.access_token, &other);

        assert!(matches!(result.unwrap_err(), AppError::Jwt(_)));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let config = Config::with_secret("test-secret-key-for-testing-only-32chars");
        assert!(verify_token_internal("not-a-token", &config).is_err());
    }
}
