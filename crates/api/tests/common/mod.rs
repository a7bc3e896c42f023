#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use tasklog_api::auth::jwt::JwtConfig;
use tasklog_api::auth::{AdminCredentials, AuthGate};
use tasklog_api::config::ServerConfig;
use tasklog_api::router::build_app_router;
use tasklog_api::state::AppState;
use tasklog_core::civil_time::CivilTimeZone;

pub const TEST_SECRET: &str = "integration-test-secret-long-enough-for-hmac";
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        time_zone: "Europe/Istanbul".to_string(),
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            token_expiry_hours: 730,
        },
        admin: AdminCredentials {
            username: ADMIN_USERNAME.to_string(),
            password: ADMIN_PASSWORD.to_string(),
        },
    }
}

/// The gate the test app uses, for minting tokens directly.
pub fn test_gate() -> AuthGate {
    let config = test_config();
    AuthGate::new(config.jwt, &config.admin)
}

/// A valid `Authorization` header value.
pub fn bearer() -> String {
    let token = test_gate().issue_token().expect("token should be issued");
    format!("Bearer {token}")
}

/// Build the full application router, with the production middleware
/// stack, on top of the given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let zone = CivilTimeZone::load(&config.time_zone).expect("test zone should load");

    let state = AppState {
        pool,
        auth: Arc::new(AuthGate::new(config.jwt.clone(), &config.admin)),
        zone,
    };

    build_app_router(state, &config)
}

/// Insert the company/branch/machine rows the task tests reference.
pub async fn seed_reference_data(pool: &PgPool) {
    sqlx::query("INSERT INTO company (company_name) VALUES ('Acme'), ('Globex')")
        .execute(pool)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO branch (branch_name, company_id)
         SELECT 'Kadikoy', company_id FROM company WHERE company_name = 'Acme'
         UNION ALL
         SELECT 'Central', company_id FROM company WHERE company_name = 'Globex'",
    )
    .execute(pool)
    .await
    .unwrap();
    sqlx::query("INSERT INTO machine (machine_name) VALUES ('Forklift-7')")
        .execute(pool)
        .await
        .unwrap();
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, authorization: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("Authorization", authorization)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_raw(app: Router, uri: &str, body: &str, authorization: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(value) = authorization {
        builder = builder.header("Authorization", value);
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, &json.to_string(), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    json: serde_json::Value,
    authorization: &str,
) -> Response<Body> {
    post_raw(app, uri, &json.to_string(), Some(authorization)).await
}

// ---------------------------------------------------------------------------
// Body helpers
// ---------------------------------------------------------------------------

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
