use super::models::{NewUser, User};
use super::password::{hash_password, verify_password};
use super::repository::UserRepository;
use super::token::TokenService;
use crate::error::{ClinicError, ResourceKind};
use std::sync::Arc;
use tracing::{info, warn};

/// Signup and login.
pub struct IdentityService {
    user_repo: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
}

impl IdentityService {
    pub fn new(user_repo: Arc<dyn UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self { user_repo, tokens }
    }

    /// Register a new account. Duplicate emails are rejected by the store.
    pub async fn signup(&self, new_user: NewUser) -> Result<User, ClinicError> {
        let password_hash = hash_password(&new_user.password)?;
        let user = User::new(
            new_user.name,
            new_user.surname,
            new_user.email,
            password_hash,
        );

        let user = self.user_repo.create(user).await?;
        info!("Registered user {} ({})", user.email, user.id);
        Ok(user)
    }

    /// Check credentials and return a signed access token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ClinicError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(ClinicError::NotFound(ResourceKind::User))?;

        if !verify_password(password, &user.password_hash)? {
            warn!("Failed login for {}", email);
            return Err(ClinicError::InvalidCredentials);
        }

        self.tokens.issue(&user.email)
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }
}
