//! Auth module: registration, login and session tokens.
//!
//! Credential storage sits behind [`repository::IdentityStore`]; the service
//! only decides what the caller gets back.

pub mod domain;
pub mod errors;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

pub use service::AuthService;
pub use token::TokenIssuer;
