//! Shared harness for HTTP-level integration tests.
//!
//! Builds the full application router with the production middleware stack
//! and drives it in-process via `tower::ServiceExt::oneshot` -- no TCP
//! listener involved. Tokens are signed with the same test secret the app
//! is configured with, standing in for the identity provider.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use lollyshoppe_api::auth::jwt::{sign_token, Claims, JwtConfig};
use lollyshoppe_api::config::ServerConfig;
use lollyshoppe_api::routes;
use lollyshoppe_api::state::AppState;
use lollyshoppe_db::models::user::{SyncUser, User};
use lollyshoppe_db::repositories::UserRepo;
use lollyshoppe_events::EventBus;

/// Shared secret standing in for the identity provider's signing key.
const TEST_SECRET: &str = "test-secret";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config),
        event_bus: Arc::new(EventBus::default()),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Tokens and seed users
// ---------------------------------------------------------------------------

/// Sign a provider-shaped token for the given subject.
pub fn token_for(external_id: &str, email: &str) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: external_id.to_string(),
        email: email.to_string(),
        given_name: None,
        family_name: None,
        exp: now + 3600,
        iat: now,
    };
    sign_token(
        &claims,
        &JwtConfig {
            secret: TEST_SECRET.to_string(),
        },
    )
    .expect("token signing should not fail")
}

/// Create (or fetch) an ADMIN user and return it with a matching token.
pub async fn seed_admin(pool: &PgPool) -> (User, String) {
    let user = UserRepo::find_or_create(
        pool,
        &SyncUser {
            external_id: "sub_admin".to_string(),
            email: "admin@lollyshoppe.test".to_string(),
            first_name: Some("Lolly".to_string()),
            last_name: Some("Admin".to_string()),
        },
    )
    .await
    .expect("admin seed should succeed");

    sqlx::query("UPDATE users SET role = 'ADMIN' WHERE id = $1")
        .bind(user.id)
        .execute(pool)
        .await
        .expect("admin promotion should succeed");

    let promoted = UserRepo::find_by_id(pool, user.id)
        .await
        .expect("re-fetch should succeed")
        .expect("admin row must exist");

    let token = token_for("sub_admin", "admin@lollyshoppe.test");
    (promoted, token)
}

/// Create (or fetch) a CLIENT user for the given tag and return it with a
/// matching token.
pub async fn seed_client(pool: &PgPool, tag: &str) -> (User, String) {
    let external_id = format!("sub_{tag}");
    let email = format!("{tag}@lollyshoppe.test");
    let user = UserRepo::find_or_create(
        pool,
        &SyncUser {
            external_id: external_id.clone(),
            email: email.clone(),
            first_name: None,
            last_name: None,
        },
    )
    .await
    .expect("client seed should succeed");

    let token = token_for(&external_id, &email);
    (user, token)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn get_anonymous(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: &str,
    json: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(json)).await
}

pub async fn post_empty(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    token: &str,
    json: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(json)).await
}

pub async fn delete(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
