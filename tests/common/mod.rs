//! Shared test harness: an in-process server over an in-memory database.
//!
//! The pool is capped at one connection so every query sees the same
//! `sqlite::memory:` instance.

// Each suite compiles its own copy; not every suite uses every helper.
#![allow(dead_code)]

use std::str::FromStr;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use uuid::Uuid;

use pressbox::auth::TokenService;
use pressbox::routes::create_router;
use pressbox::server::{run_migrations, AppState};

pub const TEST_SECRET: &str = "press-pass-secret";
pub const TEST_TTL_SECS: i64 = 3600;

pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("in-memory connect options");
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("in-memory pool");
    run_migrations(&pool).await.expect("migrations apply");
    pool
}

pub fn test_tokens() -> TokenService {
    TokenService::new(TEST_SECRET, TEST_TTL_SECS)
}

pub async fn spawn_app() -> (TestServer, SqlitePool) {
    let pool = test_pool().await;
    let state = AppState {
        pool: pool.clone(),
        tokens: test_tokens(),
    };
    let server = TestServer::new(create_router(state)).expect("test server");
    (server, pool)
}

/// Registers a user and returns `(token, user_id)`.
pub async fn register_user(server: &TestServer, name: &str, email: &str) -> (String, String) {
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "name": name,
            "email": email,
            "password": "correct-horse",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    let token = body["data"]["token"].as_str().expect("token").to_string();
    let user_id = body["data"]["user"]["id"]
        .as_str()
        .expect("user id")
        .to_string();
    (token, user_id)
}

/// Registers a user, flips their stored role to admin, and logs in again
/// so the returned token carries the admin claim.
pub async fn register_admin(
    server: &TestServer,
    pool: &SqlitePool,
    name: &str,
    email: &str,
) -> (String, String) {
    let (_, user_id) = register_user(server, name, email).await;
    let id = Uuid::parse_str(&user_id).expect("registered id is a uuid");
    sqlx::query("UPDATE users SET role = 'admin' WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .expect("promote to admin");

    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "email": email,
            "password": "correct-horse",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let token = body["data"]["token"].as_str().expect("token").to_string();
    (token, user_id)
}

/// Checks the uniform envelope shape on any response body.
pub fn assert_envelope(body: &Value, success: bool, message: &str) {
    assert_eq!(body["success"], Value::Bool(success));
    assert_eq!(body["message"].as_str(), Some(message));
    assert!(body["timestamp"].is_string(), "timestamp missing: {body}");
}
