//! Post CRUD, category filtering, pagination, and the ownership rules.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::{assert_envelope, register_admin, register_user, spawn_app};

async fn create_post(server: &axum_test::TestServer, token: &str, title: &str, category: &str) -> Value {
    let response = server
        .post("/api/posts")
        .authorization_bearer(token)
        .json(&json!({
            "title": title,
            "content": "Full story below the fold.",
            "category": category,
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn create_post_requires_a_token() {
    let (server, _pool) = spawn_app().await;

    let response = server
        .post("/api/posts")
        .json(&json!({"title": "T", "content": "C", "category": "Soccer"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_post_fills_defaults_and_attributes_the_author() {
    let (server, _pool) = spawn_app().await;
    let (token, user_id) = register_user(&server, "Beat Writer", "beat@example.com").await;

    let body = create_post(&server, &token, "Season opener", "Soccer").await;

    assert_envelope(&body, true, "Post created successfully");
    assert_eq!(body["data"]["category"].as_str(), Some("Soccer"));
    assert_eq!(body["data"]["user"]["id"].as_str(), Some(user_id.as_str()));
    assert_eq!(body["data"]["views"].as_i64(), Some(0));
    assert!(body["data"]["imageUrl"].as_str().unwrap().starts_with("https://"));
}

#[tokio::test]
async fn create_post_rejects_unknown_categories() {
    let (server, _pool) = spawn_app().await;
    let (token, _) = register_user(&server, "Beat Writer", "beat@example.com").await;

    let response = server
        .post("/api/posts")
        .authorization_bearer(&token)
        .json(&json!({"title": "T", "content": "C", "category": "Cricket"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_envelope(&body, false, "Validation error");
}

#[tokio::test]
async fn listing_filters_by_category_and_paginates() {
    let (server, _pool) = spawn_app().await;
    let (token, _) = register_user(&server, "Beat Writer", "beat@example.com").await;

    for i in 0..5 {
        create_post(&server, &token, &format!("Hockey story {i}"), "Hockey").await;
    }
    create_post(&server, &token, "Golf story", "Golf").await;

    let response = server.get("/api/posts?category=Hockey&page=1&limit=2").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_envelope(&body, true, "Posts retrieved successfully");
    assert_eq!(body["data"]["posts"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["pagination"]["total"].as_i64(), Some(5));
    // pages is ceil(total / limit)
    assert_eq!(body["data"]["pagination"]["pages"].as_i64(), Some(3));

    // Past the last page: empty list, still a success.
    let response = server.get("/api/posts?category=Hockey&page=9&limit=2").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert!(body["data"]["posts"].as_array().unwrap().is_empty());
    assert_eq!(body["data"]["pagination"]["total"].as_i64(), Some(5));
}

#[tokio::test]
async fn junk_pagination_parameters_fall_back_to_defaults() {
    let (server, _pool) = spawn_app().await;
    let (token, _) = register_user(&server, "Beat Writer", "beat@example.com").await;
    create_post(&server, &token, "Only story", "Tennis").await;

    let response = server.get("/api/posts?page=banana&limit=-5").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["pagination"]["page"].as_i64(), Some(1));
    assert_eq!(body["data"]["posts"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn absurdly_large_page_numbers_read_as_an_empty_page() {
    let (server, _pool) = spawn_app().await;
    let (token, _) = register_user(&server, "Beat Writer", "beat@example.com").await;
    create_post(&server, &token, "Only story", "Soccer").await;

    let response = server
        .get(&format!("/api/posts?page={}&limit=100", i64::MAX))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert!(body["data"]["posts"].as_array().unwrap().is_empty());
    assert_eq!(body["data"]["pagination"]["total"].as_i64(), Some(1));
}

#[tokio::test]
async fn listing_rejects_unknown_category_filter() {
    let (server, _pool) = spawn_app().await;

    let response = server.get("/api/posts?category=Cricket").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_envelope(&body, false, "Validation error");
}

#[tokio::test]
async fn reading_a_post_bumps_its_view_counter() {
    let (server, _pool) = spawn_app().await;
    let (token, _) = register_user(&server, "Beat Writer", "beat@example.com").await;
    let created = create_post(&server, &token, "Counted story", "Baseball").await;
    let post_id = created["data"]["id"].as_str().unwrap();

    for _ in 0..3 {
        let response = server.get(&format!("/api/posts/{post_id}")).await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }
    let response = server.get(&format!("/api/posts/{post_id}")).await;
    let body: Value = response.json();
    assert_envelope(&body, true, "Post retrieved successfully");
    assert_eq!(body["data"]["views"].as_i64(), Some(4));
}

#[tokio::test]
async fn missing_and_malformed_ids_both_read_as_404() {
    let (server, _pool) = spawn_app().await;

    let malformed = server.get("/api/posts/not-a-uuid").await;
    let missing = server
        .get("/api/posts/00000000-0000-4000-8000-000000000000")
        .await;

    assert_eq!(malformed.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
    let first: Value = malformed.json();
    let second: Value = missing.json();
    assert_eq!(first["message"], second["message"]);
    assert_envelope(&first, false, "Post not found");
}

#[tokio::test]
async fn only_the_owner_or_an_admin_may_update() {
    let (server, pool) = spawn_app().await;
    let (owner_token, _) = register_user(&server, "Owner", "owner@example.com").await;
    let (stranger_token, _) = register_user(&server, "Stranger", "stranger@example.com").await;
    let (admin_token, _) = register_admin(&server, &pool, "Editor", "editor@example.com").await;

    let created = create_post(&server, &owner_token, "Contested story", "Football").await;
    let post_id = created["data"]["id"].as_str().unwrap().to_string();

    let response = server
        .put(&format!("/api/posts/{post_id}"))
        .authorization_bearer(&stranger_token)
        .json(&json!({"title": "Hijacked"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_envelope(&body, false, "Not authorized to update this post");

    let response = server
        .put(&format!("/api/posts/{post_id}"))
        .authorization_bearer(&owner_token)
        .json(&json!({"title": "Corrected headline"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["title"].as_str(), Some("Corrected headline"));
    // Partial update leaves the other fields alone.
    assert_eq!(body["data"]["category"].as_str(), Some("Football"));

    let response = server
        .put(&format!("/api/posts/{post_id}"))
        .authorization_bearer(&admin_token)
        .json(&json!({"content": "Editor's cut."}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn delete_follows_the_same_ownership_rules() {
    let (server, pool) = spawn_app().await;
    let (owner_token, _) = register_user(&server, "Owner", "owner@example.com").await;
    let (stranger_token, _) = register_user(&server, "Stranger", "stranger@example.com").await;
    let (admin_token, _) = register_admin(&server, &pool, "Editor", "editor@example.com").await;

    let created = create_post(&server, &owner_token, "Short-lived story", "Basketball").await;
    let post_id = created["data"]["id"].as_str().unwrap().to_string();

    let response = server
        .delete(&format!("/api/posts/{post_id}"))
        .authorization_bearer(&stranger_token)
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_envelope(&body, false, "Not authorized to delete this post");

    let response = server
        .delete(&format!("/api/posts/{post_id}"))
        .authorization_bearer(&admin_token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_envelope(&body, true, "Post deleted successfully");

    // Deleting again is a plain miss.
    let response = server
        .delete(&format!("/api/posts/{post_id}"))
        .authorization_bearer(&admin_token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
