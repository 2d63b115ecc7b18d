use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use configs::ConflictRule;
use serde_json::{json, Value};
use service::auth::TokenIssuer;
use service::storage::MemoryStore;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use server::state::ServerState;

const KEY: &[u8] = b"0123456789abcdef0123456789abcdef";

struct TestApp {
    app: Router,
    store: Arc<MemoryStore>,
    shutdown: CancellationToken,
}

async fn build_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    store.seed_city("Vilnius", "Lithuania", "LT").await;
    let shutdown = CancellationToken::new();
    let state = ServerState::from_store(
        store.clone(),
        Arc::new(TokenIssuer::new(KEY, 7)),
        ConflictRule::Legacy,
        shutdown.clone(),
    );
    TestApp { app: server::startup::build_app(state), store, shutdown }
}

async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let req = match body {
        Some(v) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&v).unwrap()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

async fn register(app: &Router, user_name: &str, receptionist: bool) -> String {
    let body = json!({
        "full_name": "Test User",
        "email": format!("{user_name}@example.com"),
        "password": "Secr3t!",
        "user_name": user_name,
        "phone_number": "+37060000000",
        "is_receptionist": receptionist,
    });
    let (status, env) = send(app, "POST", "/api/users", None, Some(body)).await;
    assert_eq!(status, StatusCode::OK, "{env}");
    env["data"].as_str().unwrap().to_string()
}

fn office_body(address: &str) -> Value {
    json!({
        "address": address,
        "post_code": "01103",
        "city": "Vilnius",
        "office_zones": [{"name": "A", "desks": 10}, {"name": "B", "desks": 4}],
        "parking_zones": [{"name": "P", "spaces": 8}],
    })
}

#[tokio::test]
async fn health_and_docs_are_public() {
    let t = build_app().await;
    let (status, body) = send(&t.app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    let (status, doc) = send(&t.app, "GET", "/api-docs/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/offices"].is_object());
}

#[tokio::test]
async fn protected_routes_need_a_session() {
    let t = build_app().await;
    let (status, _) = send(&t.app, "GET", "/api/offices", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = send(&t.app, "GET", "/api/offices", Some("not-a-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_rejects_blank_fields_with_envelope() {
    let t = build_app().await;
    let (status, env) = send(&t.app, "POST", "/api/users", None, Some(json!({"email": "a@b.c"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(env["code"], 400);
    assert_eq!(env["errors"], json!(["Fill all fields!"]));
    assert_eq!(t.store.user_count().await, 0);
}

#[tokio::test]
async fn login_sets_cookie_that_authenticates() {
    let t = build_app().await;
    register(&t.app, "ona", false).await;

    let req = Request::builder()
        .method("POST")
        .uri("/api/users/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"email": "ona@example.com", "password": "Secr3t!"}).to_string()))
        .unwrap();
    let resp = t.app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap().to_string();
    assert!(cookie.starts_with("auth_token="));
    let pair = cookie.split(';').next().unwrap().to_string();

    let req = Request::builder().uri("/api/reservations").header(header::COOKIE, pair).body(Body::empty()).unwrap();
    let resp = t.app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_email_login_is_400() {
    let t = build_app().await;
    let (status, env) =
        send(&t.app, "POST", "/api/users/login", None, Some(json!({"email": "ghost@example.com", "password": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(env["errors"][0].as_str().unwrap().contains("ghost@example.com"));
}

#[tokio::test]
async fn office_mutations_need_receptionist() {
    let t = build_app().await;
    let guest = register(&t.app, "guest", false).await;
    let (status, _) = send(&t.app, "POST", "/api/offices", Some(&guest), Some(office_body("Gedimino 1"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(t.store.office_count().await, 0);
}

#[tokio::test]
async fn office_lifecycle_over_http() {
    let t = build_app().await;
    let owner = register(&t.app, "owner", true).await;
    let rival = register(&t.app, "rival", true).await;

    let (status, env) = send(&t.app, "POST", "/api/offices", Some(&owner), Some(office_body("Gedimino 1"))).await;
    assert_eq!(status, StatusCode::OK, "{env}");
    let id = env["data"]["id"].as_str().unwrap().to_string();

    let (status, env) = send(&t.app, "POST", "/api/offices", Some(&rival), Some(office_body("Gedimino 1"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(env["errors"], json!(["Address Gedimino 1 already taken."]));

    let uri = format!("/api/offices/{id}");
    let (status, _) = send(&t.app, "PUT", &uri, Some(&rival), Some(office_body("Gedimino 2"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, env) = send(&t.app, "DELETE", &uri, Some(&rival), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(env["errors"], json!(["You're not authorized to delete offices"]));
    assert_eq!(t.store.office_count().await, 1);

    let (status, env) = send(&t.app, "GET", &uri, Some(&rival), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(env["data"]["address"], "Gedimino 1");
    assert_eq!(env["data"]["office_zones"].as_array().unwrap().len(), 2);

    let (status, _) = send(&t.app, "DELETE", &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, env) = send(&t.app, "GET", &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(env["errors"], json!([format!("There is no object with id: {id}")]));
}

#[tokio::test]
async fn double_booking_is_refused() {
    let t = build_app().await;
    let owner = register(&t.app, "owner", true).await;
    let guest = register(&t.app, "guest", false).await;
    let (_, env) = send(&t.app, "POST", "/api/offices", Some(&owner), Some(office_body("Gedimino 1"))).await;
    let office = &env["data"];

    let booking = json!({
        "office_id": office["id"],
        "office_zone_id": office["office_zones"][0]["id"],
        "date": "2026-03-02T09:00:00Z",
        "office_desk": "D1",
    });
    let (status, env) = send(&t.app, "POST", "/api/reservations", Some(&guest), Some(booking.clone())).await;
    assert_eq!(status, StatusCode::OK, "{env}");
    let reservation_id = env["data"]["id"].as_str().unwrap().to_string();

    let (status, env) = send(&t.app, "POST", "/api/reservations", Some(&owner), Some(booking.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(env["errors"], json!(["This seat is already reserved."]));
    assert_eq!(t.store.reservation_count().await, 1);

    let uri = format!("/api/reservations/{reservation_id}");
    let (status, _) = send(&t.app, "PUT", &uri, Some(&owner), Some(booking)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, env) = send(&t.app, "GET", "/api/reservations", Some(&guest), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(env["data"].as_array().unwrap().len(), 1);
    assert_eq!(env["data"][0]["office"]["city"]["name"], "Vilnius");
}

#[tokio::test]
async fn receptionist_creates_cities_and_anyone_lists_them() {
    let t = build_app().await;
    let owner = register(&t.app, "owner", true).await;
    let body = json!({"name": "Riga", "country": {"name": "Latvia", "symbol": "LV"}});
    let (status, _) = send(&t.app, "POST", "/api/cities", Some(&owner), Some(body)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, env) = send(&t.app, "GET", "/api/cities?country=Latvia", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(env["data"][0]["name"], "Riga");
    let (_, env) = send(&t.app, "GET", "/api/countries", None, None).await;
    assert_eq!(env["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn shutdown_cancels_in_flight_work() {
    let t = build_app().await;
    let token = register(&t.app, "ona", false).await;
    t.shutdown.cancel();
    let (status, body) = send(&t.app, "GET", "/api/reservations", Some(&token), None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "request cancelled");
}
