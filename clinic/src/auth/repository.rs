use super::models::User;
use crate::error::ClinicError;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user. Fails with `AlreadyExists(User)` when the email is taken.
    async fn create(&self, user: User) -> Result<User, ClinicError>;

    /// Find a user by email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ClinicError>;
}
