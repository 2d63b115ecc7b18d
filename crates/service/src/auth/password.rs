//! Password hashing and the account rules enforced by the identity stores.

use argon2::{password_hash::{PasswordHasher, PasswordVerifier, SaltString}, Argon2, PasswordHash};
use rand::rngs::OsRng;

use super::domain::NewUser;
use super::errors::AuthError;

pub const MIN_PASSWORD_LEN: usize = 6;

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::HashError(e.to_string()))?
        .to_string())
}

/// An unparsable stored hash is an error, a wrong password is `Ok(false)`.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::HashError(e.to_string()))?;
    Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
}

pub fn policy_violations(password: &str) -> Vec<String> {
    let mut out = Vec::new();
    if password.chars().count() < MIN_PASSWORD_LEN {
        out.push(format!("Passwords must be at least {MIN_PASSWORD_LEN} characters."));
    }
    if password.chars().all(char::is_alphanumeric) {
        out.push("Passwords must have at least one non alphanumeric character.".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        out.push("Passwords must have at least one digit ('0'-'9').".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        out.push("Passwords must have at least one lowercase ('a'-'z').".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        out.push("Passwords must have at least one uppercase ('A'-'Z').".to_string());
    }
    out
}

/// Every reason to refuse `user`, user name first, then email, then password.
pub fn rejections(user: &NewUser, password: &str, name_taken: bool, email_taken: bool) -> Vec<String> {
    let mut out = Vec::new();
    if name_taken {
        out.push(format!("Username '{}' is already taken.", user.user_name));
    }
    if models::app_user::validate_email(&user.email).is_err() {
        out.push(format!("Email '{}' is invalid.", user.email));
    } else if email_taken {
        out.push(format!("Email '{}' is already taken.", user.email));
    }
    out.extend(policy_violations(password));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("Passw0rd!").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("Passw0rd!", &hash).unwrap());
        assert!(!verify_password("passw0rd!", &hash).unwrap());
        assert!(verify_password("x", "not-a-hash").is_err());
    }

    #[test]
    fn strong_password_passes() {
        assert!(policy_violations("Secr3t!").is_empty());
    }

    #[test]
    fn weak_password_lists_every_rule() {
        let v = policy_violations("abc");
        assert_eq!(v.len(), 4);
        assert!(v[0].contains("at least 6"));
    }

    #[test]
    fn taken_name_and_invalid_email_are_both_reported() {
        let user = NewUser {
            email: "nobody".into(),
            user_name: "jonas".into(),
            full_name: "Jonas".into(),
            phone_number: "+370".into(),
            is_receptionist: false,
        };
        let r = rejections(&user, "Secr3t!", true, true);
        assert_eq!(r, ["Username 'jonas' is already taken.", "Email 'nobody' is invalid."]);
    }
}
