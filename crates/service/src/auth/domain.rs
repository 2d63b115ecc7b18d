use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::User;

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterInput {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub is_receptionist: bool,
}

impl RegisterInput {
    pub fn has_blank_field(&self) -> bool {
        [&self.full_name, &self.email, &self.password, &self.user_name, &self.phone_number]
            .iter()
            .any(|f| f.trim().is_empty())
    }
}

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Profile handed to the identity store; the password travels separately.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub user_name: String,
    pub full_name: String,
    pub phone_number: String,
    pub is_receptionist: bool,
}

impl From<&RegisterInput> for NewUser {
    fn from(i: &RegisterInput) -> Self {
        Self {
            email: i.email.clone(),
            user_name: i.user_name.clone(),
            full_name: i.full_name.clone(),
            phone_number: i.phone_number.clone(),
            is_receptionist: i.is_receptionist,
        }
    }
}

/// Domain user (business view)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub user_name: String,
    pub full_name: String,
    pub is_receptionist: bool,
}

impl From<&User> for AuthUser {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            email: u.email.clone(),
            user_name: u.user_name.clone(),
            full_name: u.full_name.clone(),
            is_receptionist: u.is_receptionist,
        }
    }
}
