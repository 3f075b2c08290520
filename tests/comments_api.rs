//! Comment threads keyed by post reference, plus the admin moderation list.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::{assert_envelope, register_admin, register_user, spawn_app};

const POST_REF: &str = "football-news-1";

async fn add_comment(server: &axum_test::TestServer, token: &str, post_ref: &str, text: &str) -> Value {
    let response = server
        .post(&format!("/api/comments/{post_ref}"))
        .authorization_bearer(token)
        .json(&json!({"text": text}))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn adding_a_comment_requires_a_token() {
    let (server, _pool) = spawn_app().await;

    let response = server
        .post(&format!("/api/comments/{POST_REF}"))
        .json(&json!({"text": "Great game"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn comment_lands_on_its_post_thread() {
    let (server, _pool) = spawn_app().await;
    let (token, user_id) = register_user(&server, "Fan One", "fan1@example.com").await;

    let body = add_comment(&server, &token, POST_REF, "  What a finish!  ").await;
    assert_envelope(&body, true, "Comment added successfully");
    // Text is stored trimmed.
    assert_eq!(body["data"]["text"].as_str(), Some("What a finish!"));
    assert_eq!(body["data"]["postId"].as_str(), Some(POST_REF));
    assert_eq!(body["data"]["user"]["id"].as_str(), Some(user_id.as_str()));

    let response = server.get(&format!("/api/comments/{POST_REF}")).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_envelope(&body, true, "Comments retrieved successfully");
    assert_eq!(body["data"]["comments"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["pagination"]["total"].as_i64(), Some(1));
}

#[tokio::test]
async fn malformed_post_references_are_rejected() {
    let (server, _pool) = spawn_app().await;
    let (token, _) = register_user(&server, "Fan One", "fan1@example.com").await;

    for bad_ref in ["football", "Football-News-1", "football-news-one", "a-b-c-1"] {
        let response = server
            .post(&format!("/api/comments/{bad_ref}"))
            .authorization_bearer(&token)
            .json(&json!({"text": "hello"}))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "ref {bad_ref}");
    }
}

#[tokio::test]
async fn unknown_post_reference_lists_an_empty_thread() {
    let (server, _pool) = spawn_app().await;

    let response = server.get("/api/comments/soccer-recap-99").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert!(body["data"]["comments"].as_array().unwrap().is_empty());
    assert_eq!(body["data"]["pagination"]["total"].as_i64(), Some(0));
}

#[tokio::test]
async fn comment_text_is_bounded() {
    let (server, _pool) = spawn_app().await;
    let (token, _) = register_user(&server, "Fan One", "fan1@example.com").await;

    let response = server
        .post(&format!("/api/comments/{POST_REF}"))
        .authorization_bearer(&token)
        .json(&json!({"text": "   "}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let long = "x".repeat(1001);
    let response = server
        .post(&format!("/api/comments/{POST_REF}"))
        .authorization_bearer(&token)
        .json(&json!({"text": long}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let at_limit = "x".repeat(1000);
    let response = server
        .post(&format!("/api/comments/{POST_REF}"))
        .authorization_bearer(&token)
        .json(&json!({"text": at_limit}))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
}

#[tokio::test]
async fn only_the_owner_or_an_admin_may_edit_a_comment() {
    let (server, pool) = spawn_app().await;
    let (owner_token, _) = register_user(&server, "Owner", "owner@example.com").await;
    let (stranger_token, _) = register_user(&server, "Stranger", "stranger@example.com").await;
    let (admin_token, _) = register_admin(&server, &pool, "Mod", "mod@example.com").await;

    let created = add_comment(&server, &owner_token, POST_REF, "First take").await;
    let comment_id = created["data"]["id"].as_str().unwrap().to_string();

    let response = server
        .put(&format!("/api/comments/{comment_id}"))
        .authorization_bearer(&stranger_token)
        .json(&json!({"text": "Hijacked"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_envelope(&body, false, "Not authorized to update this comment");

    let response = server
        .put(&format!("/api/comments/{comment_id}"))
        .authorization_bearer(&owner_token)
        .json(&json!({"text": "Second take"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["text"].as_str(), Some("Second take"));

    let response = server
        .delete(&format!("/api/comments/{comment_id}"))
        .authorization_bearer(&admin_token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_envelope(&body, true, "Comment deleted successfully");

    let response = server
        .delete(&format!("/api/comments/{comment_id}"))
        .authorization_bearer(&admin_token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn moderation_list_is_admin_only() {
    let (server, pool) = spawn_app().await;
    let (user_token, _) = register_user(&server, "Fan One", "fan1@example.com").await;
    let (admin_token, _) = register_admin(&server, &pool, "Mod", "mod@example.com").await;

    add_comment(&server, &user_token, POST_REF, "One").await;
    add_comment(&server, &user_token, "hockey-recap-2", "Two").await;

    let response = server
        .get("/api/comments")
        .authorization_bearer(&user_token)
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_envelope(&body, false, "Access denied. Admin role required");

    let response = server
        .get("/api/comments")
        .authorization_bearer(&admin_token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["comments"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["pagination"]["total"].as_i64(), Some(2));
}
