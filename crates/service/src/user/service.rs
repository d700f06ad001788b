use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::domain::{LoginUserRequest, RegisterUserRequest, UpdateUserRequest, User, UserResponse};
use super::repository::UserRepository;
use crate::errors::ServiceError;
use crate::validation::Validate;

const INVALID_LOGIN: &str = "Username or password is invalid";

/// User business service independent of web framework
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self { Self { repo } }

    /// Register a new user with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::user::{UserService, repository::mock::MockUserRepository, domain::RegisterUserRequest};
    /// use std::sync::Arc;
    /// let svc = UserService::new(Arc::new(MockUserRepository::default()));
    /// let req = RegisterUserRequest { username: Some("eko".into()), password: Some("secret".into()), name: Some("Eko".into()) };
    /// let user = tokio_test::block_on(svc.register(req)).unwrap();
    /// assert_eq!(user.username, "eko");
    /// assert!(user.token.is_none());
    /// ```
    #[instrument(skip(self, request))]
    pub async fn register(&self, request: RegisterUserRequest) -> Result<UserResponse, ServiceError> {
        let input = request.validate()?;
        if self.repo.find_by_username(&input.username).await?.is_some() {
            debug!(username = %input.username, "username taken");
            return Err(ServiceError::Conflict("Username already exists".into()));
        }

        let hash = hash_password(input.password).await?;
        let user = self.repo.create(&input.username, &input.name, &hash).await?;
        info!(username = %user.username, "user_registered");
        Ok(UserResponse::from(&user))
    }

    /// Verify credentials and issue a fresh session token.
    ///
    /// A missing user and a wrong password produce the same `Unauthorized` error,
    /// and neither touches the stored token.
    #[instrument(skip(self, request))]
    pub async fn login(&self, request: LoginUserRequest) -> Result<UserResponse, ServiceError> {
        let input = request.validate()?;
        let user = self.repo
            .find_by_username(&input.username)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized(INVALID_LOGIN.into()))?;

        if !verify_password(input.password, user.password_hash.clone()).await? {
            warn!(username = %user.username, "login_rejected");
            return Err(ServiceError::Unauthorized(INVALID_LOGIN.into()));
        }

        let token = Uuid::new_v4().to_string();
        if !self.repo.set_token(&user.username, Some(token.clone())).await? {
            return Err(ServiceError::Unauthorized(INVALID_LOGIN.into()));
        }
        info!(username = %user.username, "user_logged_in");
        Ok(UserResponse { username: user.username, name: user.name, token: Some(token) })
    }

    pub async fn get(&self, user: &User) -> Result<UserResponse, ServiceError> {
        Ok(UserResponse::from(user))
    }

    /// Apply only the provided fields; a new password is re-hashed.
    #[instrument(skip(self, user, request), fields(username = %user.username))]
    pub async fn update(&self, user: &User, request: UpdateUserRequest) -> Result<UserResponse, ServiceError> {
        let changes = request.validate()?;
        let hash = match changes.password {
            Some(p) => Some(hash_password(p).await?),
            None => None,
        };
        let updated = self.repo
            .update_profile(&user.username, changes.name.as_deref(), hash.as_deref())
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))?;
        info!(username = %updated.username, password_changed = hash.is_some(), "user_updated");
        Ok(UserResponse::from(&updated))
    }

    #[instrument(skip(self, user), fields(username = %user.username))]
    pub async fn logout(&self, user: &User) -> Result<(), ServiceError> {
        if !self.repo.set_token(&user.username, None).await? {
            return Err(ServiceError::unauthorized());
        }
        info!(username = %user.username, "user_logged_out");
        Ok(())
    }

    /// Resolve a session token to its user; the auth middleware's only entry point.
    pub async fn authenticate(&self, token: &str) -> Result<User, ServiceError> {
        if token.trim().is_empty() {
            return Err(ServiceError::unauthorized());
        }
        self.repo.find_by_token(token).await?.ok_or_else(ServiceError::unauthorized)
    }
}

/// Argon2 with a random salt, off the async executor.
pub async fn hash_password(password: String) -> Result<String, ServiceError> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| ServiceError::Hash(e.to_string()))
    })
    .await
    .map_err(|e| ServiceError::Hash(e.to_string()))?
}

pub async fn verify_password(password: String, hash: String) -> Result<bool, ServiceError> {
    tokio::task::spawn_blocking(move || {
        let parsed = PasswordHash::new(&hash).map_err(|e| ServiceError::Hash(e.to_string()))?;
        Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
    })
    .await
    .map_err(|e| ServiceError::Hash(e.to_string()))?
}
