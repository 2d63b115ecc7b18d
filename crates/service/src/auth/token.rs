//! Signed session tokens (HS512).

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::errors::AuthError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User name.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Built once at startup from [`configs::AuthConfig`] and shared.
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(key: &[u8], ttl_days: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(key),
            decoding: DecodingKey::from_secret(key),
            ttl: Duration::days(ttl_days),
        }
    }

    pub fn from_config(cfg: &configs::AuthConfig) -> Self {
        Self::new(cfg.token_key.as_bytes(), cfg.token_ttl_days)
    }

    pub fn create_token(&self, user_name: &str) -> Result<String, AuthError> {
        self.create_token_at(user_name, Utc::now())
    }

    pub fn create_token_at(&self, user_name: &str, now: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = Claims { sub: user_name.to_string(), iat: now.timestamp(), exp: (now + self.ttl).timestamp() };
        encode(&Header::new(Algorithm::HS512), &claims, &self.encoding).map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Checks signature, algorithm and expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS512))
            .map(|data| data.claims)
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"0123456789abcdef0123456789abcdef";

    #[test]
    fn token_carries_user_name_and_seven_days() {
        let issuer = TokenIssuer::new(KEY, 7);
        let now = Utc::now();
        let token = issuer.create_token_at("jonas", now).unwrap();
        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.sub, "jonas");
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 3600);
        assert_eq!(claims.iat, now.timestamp());
    }

    #[test]
    fn expired_token_is_refused() {
        let issuer = TokenIssuer::new(KEY, 7);
        let token = issuer.create_token_at("jonas", Utc::now() - Duration::days(8)).unwrap();
        assert!(issuer.verify(&token).is_err());
    }

    #[test]
    fn foreign_key_is_refused() {
        let token = TokenIssuer::new(KEY, 7).create_token("jonas").unwrap();
        let other = TokenIssuer::new(b"ffffffffffffffffffffffffffffffff", 7);
        assert!(other.verify(&token).is_err());
    }
}
