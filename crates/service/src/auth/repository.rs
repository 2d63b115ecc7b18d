use async_trait::async_trait;

use super::domain::NewUser;
use super::errors::AuthError;
use crate::entities::User;

/// Credential storage used by registration, login and request authentication.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;
    async fn find_user_by_user_name(&self, user_name: &str) -> Result<Option<User>, AuthError>;
    /// Hashes `password` and stores the user. Account rule violations come
    /// back as [`AuthError::Rejected`] with one description per rule.
    async fn create_user(&self, user: NewUser, password: &str) -> Result<User, AuthError>;
    async fn check_password(&self, user: &User, password: &str) -> Result<bool, AuthError>;
}
