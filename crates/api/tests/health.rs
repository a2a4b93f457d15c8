//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_with_authorization, token_for};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test: GET /health returns 200 with expected JSON fields
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_returns_ok_with_json(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
}

// ---------------------------------------------------------------------------
// Test: Unknown route returns 404
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_route_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: API routes require a bearer token
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn api_routes_reject_missing_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/tasks/today").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn api_routes_reject_non_bearer_schemes(pool: PgPool) {
    for header in ["Basic dXNlcjpwYXNz", "Bearer ", "bearer abc", "Token abc"] {
        let app = common::build_test_app(pool.clone());
        let response = get_with_authorization(app, "/api/v1/tasks/today", header).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "header: {header}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "UNAUTHORIZED");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn api_routes_reject_tampered_tokens(pool: PgPool) {
    let app = common::build_test_app(pool);
    let header = format!("Bearer {}x", token_for(7));
    let response = get_with_authorization(app, "/api/v1/tasks/today", &header).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid or expired token");
}
