use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::domain::{AuthUser, LoginInput, NewUser, RegisterInput};
use super::errors::AuthError;
use super::repository::IdentityStore;
use super::token::TokenIssuer;
use crate::cancel::guarded;
use crate::envelope::Envelope;
use crate::errors::ServiceError;

const FILL_ALL_FIELDS: &str = "Fill all fields!";
const WRONG_CREDENTIALS: &str = "Wrong email or password!";

/// Auth business service independent of web framework
pub struct AuthService<S: IdentityStore + ?Sized> {
    store: Arc<S>,
    tokens: Arc<TokenIssuer>,
}

impl<S: IdentityStore + ?Sized> AuthService<S> {
    pub fn new(store: Arc<S>, tokens: Arc<TokenIssuer>) -> Self { Self { store, tokens } }

    /// Register a new user and return a session token.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{AuthService, TokenIssuer, domain::RegisterInput};
    /// use service::storage::memory::MemoryStore;
    /// use tokio_util::sync::CancellationToken;
    /// let tokens = Arc::new(TokenIssuer::new(b"0123456789abcdef0123456789abcdef", 7));
    /// let svc = AuthService::new(Arc::new(MemoryStore::default()), tokens.clone());
    /// let input = RegisterInput {
    ///     full_name: "Jonas Jonaitis".into(),
    ///     email: "jonas@example.com".into(),
    ///     password: "Secr3t!".into(),
    ///     user_name: "jonas".into(),
    ///     phone_number: "+37060000000".into(),
    ///     is_receptionist: false,
    /// };
    /// let env = tokio_test::block_on(svc.register(input, &CancellationToken::new())).unwrap();
    /// assert_eq!(tokens.verify(&env.data.unwrap()).unwrap().sub, "jonas");
    /// ```
    #[instrument(skip(self, input, cancel), fields(email = %input.email, user_name = %input.user_name))]
    pub async fn register(&self, input: RegisterInput, cancel: &CancellationToken) -> Result<Envelope<String>, ServiceError> {
        if input.has_blank_field() {
            warn!(error = FILL_ALL_FIELDS, "registration refused");
            return Ok(Envelope::bad_request([FILL_ALL_FIELDS]));
        }
        let created = guarded(cancel, self.store.create_user(NewUser::from(&input), &input.password)).await;
        let user = match created {
            Ok(user) => user,
            Err(ServiceError::Auth(AuthError::Rejected(reasons))) => {
                warn!(?reasons, "registration refused");
                return Ok(Envelope::bad_request(reasons));
            }
            Err(e) => return Err(e),
        };
        info!(user_id = %user.id, "user_registered");
        Ok(Envelope::ok(self.tokens.create_token(&user.user_name)?))
    }

    /// Authenticate by email and password and return a session token.
    #[instrument(skip(self, input, cancel), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput, cancel: &CancellationToken) -> Result<Envelope<String>, ServiceError> {
        let Some(user) = guarded(cancel, self.store.find_user_by_email(&input.email)).await? else {
            let error = format!("Can not find user with Email {}", input.email);
            warn!(%error, "login refused");
            return Ok(Envelope::bad_request([error]));
        };
        if !guarded(cancel, self.store.check_password(&user, &input.password)).await? {
            warn!(error = WRONG_CREDENTIALS, "password mismatch");
            return Ok(Envelope::bad_request([WRONG_CREDENTIALS]));
        }
        info!(user_id = %user.id, "user_logged_in");
        Ok(Envelope::ok(self.tokens.create_token(&user.user_name)?))
    }

    /// The user a bearer token belongs to, or `None` for a bad or stale token.
    pub async fn authenticate(&self, token: &str, cancel: &CancellationToken) -> Result<Option<AuthUser>, ServiceError> {
        let claims = match self.tokens.verify(token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e, "token refused");
                return Ok(None);
            }
        };
        let user = guarded(cancel, self.store.find_user_by_user_name(&claims.sub)).await?;
        Ok(user.as_ref().map(AuthUser::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStore;

    fn issuer() -> Arc<TokenIssuer> {
        Arc::new(TokenIssuer::new(b"0123456789abcdef0123456789abcdef", 7))
    }

    fn register_input(user_name: &str, email: &str) -> RegisterInput {
        RegisterInput {
            full_name: "Ona Onaite".into(),
            email: email.into(),
            password: "Secr3t!".into(),
            user_name: user_name.into(),
            phone_number: "+37061111111".into(),
            is_receptionist: true,
        }
    }

    #[tokio::test]
    async fn blank_field_is_refused_before_the_store() {
        let store = Arc::new(MemoryStore::default());
        store.fail_writes(true);
        let svc = AuthService::new(store.clone(), issuer());
        let mut input = register_input("ona", "ona@example.com");
        input.phone_number = String::new();
        let env = svc.register(input, &CancellationToken::new()).await.unwrap();
        assert_eq!(env.code, 400);
        assert_eq!(env.errors(), ["Fill all fields!"]);
        assert_eq!(store.user_count().await, 0);
    }

    #[tokio::test]
    async fn register_then_login_and_authenticate() {
        let svc = AuthService::new(Arc::new(MemoryStore::default()), issuer());
        let token = CancellationToken::new();
        assert!(svc.register(register_input("ona", "ona@example.com"), &token).await.unwrap().is_success());

        let login = LoginInput { email: "ona@example.com".into(), password: "Secr3t!".into() };
        let session = svc.login(login, &token).await.unwrap().data.unwrap();
        let user = svc.authenticate(&session, &token).await.unwrap().unwrap();
        assert_eq!(user.user_name, "ona");
        assert!(user.is_receptionist);
        assert!(svc.authenticate("garbage", &token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn store_rejections_become_error_list() {
        let svc = AuthService::new(Arc::new(MemoryStore::default()), issuer());
        let token = CancellationToken::new();
        svc.register(register_input("ona", "ona@example.com"), &token).await.unwrap();
        let env = svc.register(register_input("ona", "ona@example.com"), &token).await.unwrap();
        assert_eq!(env.errors(), ["Username 'ona' is already taken.", "Email 'ona@example.com' is already taken."]);
    }

    #[tokio::test]
    async fn unknown_email_names_the_email() {
        let svc = AuthService::new(Arc::new(MemoryStore::default()), issuer());
        let login = LoginInput { email: "ghost@example.com".into(), password: "x".into() };
        let env = svc.login(login, &CancellationToken::new()).await.unwrap();
        assert_eq!(env.code, 400);
        assert!(env.errors()[0].contains("ghost@example.com"));
    }

    #[tokio::test]
    async fn wrong_password_is_generic() {
        let svc = AuthService::new(Arc::new(MemoryStore::default()), issuer());
        let token = CancellationToken::new();
        svc.register(register_input("ona", "ona@example.com"), &token).await.unwrap();
        let login = LoginInput { email: "ona@example.com".into(), password: "Wrong1!".into() };
        let env = svc.login(login, &token).await.unwrap();
        assert_eq!(env.errors(), ["Wrong email or password!"]);
    }
}
