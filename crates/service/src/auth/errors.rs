use thiserror::Error;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    /// The identity store refused the user; each entry is user-facing.
    #[error("user rejected: {}", .0.join(" "))]
    Rejected(Vec<String>),
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("token error: {0}")]
    TokenError(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Rejected(_) => 1001,
            AuthError::HashError(_) => 1101,
            AuthError::TokenError(_) => 1102,
            AuthError::Repository(_) => 1200,
        }
    }
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(e: sea_orm::DbErr) -> Self { AuthError::Repository(e.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_stay_stable() {
        assert_eq!(AuthError::Rejected(vec!["x".into()]).code(), 1001);
        assert_eq!(AuthError::HashError("salt".into()).code(), 1101);
        assert_eq!(AuthError::TokenError("exp".into()).code(), 1102);
        assert_eq!(AuthError::from(sea_orm::DbErr::Custom("down".into())).code(), 1200);
    }

    #[test]
    fn rejection_lists_every_reason() {
        let e = AuthError::Rejected(vec!["Username 'a' is already taken.".into(), "Email 'b' is already taken.".into()]);
        assert_eq!(e.to_string(), "user rejected: Username 'a' is already taken. Email 'b' is already taken.");
    }
}
