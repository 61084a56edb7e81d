//! HTTP-level tests for the admin-only user listings.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, seed_admin, seed_client};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_lists_all_users(pool: PgPool) {
    let (_, admin_token) = seed_admin(&pool).await;
    seed_client(&pool, "one").await;
    seed_client(&pool, "two").await;

    let response = get(common::build_test_app(pool), "/api/v1/users", &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn clients_listing_excludes_admins(pool: PgPool) {
    let (_, admin_token) = seed_admin(&pool).await;
    seed_client(&pool, "only").await;

    let response = get(
        common::build_test_app(pool),
        "/api/v1/users/clients",
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["role"], "CLIENT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn client_cannot_list_users(pool: PgPool) {
    let (_, client_token) = seed_client(&pool, "nosy").await;

    let response = get(common::build_test_app(pool), "/api/v1/users", &client_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
}
