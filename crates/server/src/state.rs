use std::sync::Arc;

use configs::ConflictRule;
use service::auth::repository::IdentityStore;
use service::auth::{AuthService, TokenIssuer};
use service::catalog::repository::CatalogRepository;
use service::catalog::CatalogService;
use service::office::repository::OfficeRepository;
use service::office::OfficeService;
use service::reservation::repository::ReservationRepository;
use service::reservation::ReservationService;
use tokio_util::sync::CancellationToken;

/// Shared handler state. Services sit behind trait objects so the same
/// router runs on Postgres or on the in-memory store.
#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService<dyn IdentityStore>>,
    pub catalog: Arc<CatalogService<dyn CatalogRepository>>,
    pub offices: Arc<OfficeService<dyn OfficeRepository>>,
    pub reservations: Arc<ReservationService<dyn ReservationRepository>>,
    /// Cancelled on shutdown; every request works on a child token.
    pub shutdown: CancellationToken,
}

impl ServerState {
    pub fn from_store<S>(store: Arc<S>, tokens: Arc<TokenIssuer>, rule: ConflictRule, shutdown: CancellationToken) -> Self
    where
        S: IdentityStore + CatalogRepository + OfficeRepository + ReservationRepository + 'static,
    {
        let identity: Arc<dyn IdentityStore> = store.clone();
        let catalog: Arc<dyn CatalogRepository> = store.clone();
        let offices: Arc<dyn OfficeRepository> = store.clone();
        let reservations: Arc<dyn ReservationRepository> = store;
        Self {
            auth: Arc::new(AuthService::new(identity, tokens)),
            catalog: Arc::new(CatalogService::new(catalog)),
            offices: Arc::new(OfficeService::new(offices)),
            reservations: Arc::new(ReservationService::new(reservations, rule)),
            shutdown,
        }
    }

    pub fn request_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }
}
