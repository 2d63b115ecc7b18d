use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use service::auth::TokenIssuer;
use service::storage::{MemoryStore, SeaOrmStore};
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// config.toml first; only when it does not exist does everything come from
/// env vars. A config file that fails to parse or validate stops startup.
pub fn load_config() -> anyhow::Result<AppConfig> {
    let path = configs::config_path();
    if !std::path::Path::new(&path).exists() {
        warn!(%path, "config file not found, using environment");
    }
    let cfg = AppConfig::load_and_validate()?;
    info!(%path, rule = ?cfg.reservations.conflict_rule, "config loaded");
    Ok(cfg)
}

/// Picks the store from `database.url`: `memory://` keeps everything in
/// process, anything else is Postgres (migrated on startup).
pub async fn build_state(cfg: &AppConfig, shutdown: CancellationToken) -> anyhow::Result<ServerState> {
    let tokens = Arc::new(TokenIssuer::from_config(&cfg.auth));
    let rule = cfg.reservations.conflict_rule;
    if cfg.database.is_memory() {
        info!(?rule, "using in-memory store");
        return Ok(ServerState::from_store(Arc::new(MemoryStore::new()), tokens, rule, shutdown));
    }
    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    info!(?rule, "database ready");
    Ok(ServerState::from_store(Arc::new(SeaOrmStore::new(db)), tokens, rule, shutdown))
}

pub fn build_app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

/// Public entry: build the app and serve until `shutdown` is cancelled.
pub async fn run(cfg: AppConfig, shutdown: CancellationToken) -> anyhow::Result<()> {
    let state = build_state(&cfg, shutdown.clone()).await?;
    let app = build_app(state);

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;
    info!("server drained");
    Ok(())
}
