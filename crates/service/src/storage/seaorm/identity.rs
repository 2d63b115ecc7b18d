use async_trait::async_trait;
use chrono::Utc;
use models::app_user;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::{is_unique_violation, SeaOrmStore};
use crate::auth::domain::NewUser;
use crate::auth::errors::AuthError;
use crate::auth::password;
use crate::auth::repository::IdentityStore;
use crate::entities::User;

#[async_trait]
impl IdentityStore for SeaOrmStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let row = app_user::Entity::find().filter(app_user::Column::Email.eq(email)).one(&self.db).await?;
        Ok(row.map(Into::into))
    }

    async fn find_user_by_user_name(&self, user_name: &str) -> Result<Option<User>, AuthError> {
        let row = app_user::Entity::find().filter(app_user::Column::UserName.eq(user_name)).one(&self.db).await?;
        Ok(row.map(Into::into))
    }

    async fn create_user(&self, user: NewUser, password: &str) -> Result<User, AuthError> {
        let name_taken = self.find_user_by_user_name(&user.user_name).await?.is_some();
        let email_taken = self.find_user_by_email(&user.email).await?.is_some();
        let reasons = password::rejections(&user, password, name_taken, email_taken);
        if !reasons.is_empty() {
            return Err(AuthError::Rejected(reasons));
        }

        let row = app_user::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(user.email.clone()),
            user_name: Set(user.user_name.clone()),
            full_name: Set(user.full_name),
            phone_number: Set(user.phone_number),
            password_hash: Set(password::hash_password(password)?),
            is_receptionist: Set(user.is_receptionist),
            created_at: Set(Utc::now().into()),
        };
        match row.insert(&self.db).await {
            Ok(created) => Ok(created.into()),
            // lost a race against a concurrent registration
            Err(e) if is_unique_violation(&e) => Err(AuthError::Rejected(vec![format!(
                "Username '{}' or email '{}' is already taken.",
                user.user_name, user.email
            )])),
            Err(e) => Err(e.into()),
        }
    }

    async fn check_password(&self, user: &User, password: &str) -> Result<bool, AuthError> {
        password::verify_password(password, &user.password_hash)
    }
}
