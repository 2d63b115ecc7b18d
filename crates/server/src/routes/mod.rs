pub mod catalog;
pub mod offices;
pub mod reservations;
pub mod users;

use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use common::types::Health;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;

use crate::auth::require_bearer_token_state;
use crate::openapi::ApiDoc;
use crate::state::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router, including public and protected routes
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api/users", post(users::register))
        .route("/api/users/login", post(users::login))
        .route("/api/countries", get(catalog::list_countries))
        .route("/api/cities", get(catalog::list_cities).post(catalog::create_city))
        .route("/api/offices", get(offices::list).post(offices::create))
        .route("/api/offices/:id", get(offices::get).put(offices::update).delete(offices::delete))
        .route("/api/reservations", get(reservations::list).post(reservations::create))
        .route(
            "/api/reservations/:id",
            get(reservations::get).put(reservations::update).delete(reservations::delete),
        );

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(api)
        .layer(middleware::from_fn_with_state(state.clone(), require_bearer_token_state))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        // 每次请求创建 span，包含方法和路径
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        // 响应返回时打点，包含状态码与耗时
                        .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                        .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
                )
                .layer(cors),
        )
}
