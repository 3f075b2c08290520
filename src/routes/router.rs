/**
 * Route Table
 *
 * Every endpoint lives under /api. The comment routes overload a single
 * path segment: GET and POST on /api/comments/{id} treat it as a post
 * reference, PUT and DELETE treat it as a comment id. The schedule
 * `upcoming` and `live` views are registered as static paths, which axum
 * matches ahead of the {id} capture.
 */

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth;
use crate::comments;
use crate::posts;
use crate::response::{ok, ApiResponse};
use crate::schedules;
use crate::server::state::AppState;

#[derive(Serialize)]
struct ApiInfo {
    version: &'static str,
}

/// `GET /api` — a liveness-style welcome for anyone poking the base path.
async fn welcome() -> (StatusCode, Json<ApiResponse<ApiInfo>>) {
    ok(
        "Welcome to the Pressbox API",
        ApiInfo {
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}

/// Unmatched paths still get the envelope.
async fn not_found() -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::new(false, "Resource not found", None)),
    )
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api", get(welcome))
        // auth
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))
        // posts
        .route(
            "/api/posts",
            get(posts::handlers::list_posts).post(posts::handlers::create_post),
        )
        .route(
            "/api/posts/{id}",
            get(posts::handlers::get_post)
                .put(posts::handlers::update_post)
                .delete(posts::handlers::delete_post),
        )
        // comments
        .route("/api/comments", get(comments::handlers::list_all_comments))
        .route(
            "/api/comments/{id}",
            get(comments::handlers::list_comments_by_post)
                .post(comments::handlers::add_comment)
                .put(comments::handlers::update_comment)
                .delete(comments::handlers::delete_comment),
        )
        // schedules
        .route(
            "/api/schedules",
            get(schedules::handlers::list_schedules).post(schedules::handlers::create_schedule),
        )
        .route(
            "/api/schedules/upcoming",
            get(schedules::handlers::upcoming_schedules),
        )
        .route(
            "/api/schedules/live",
            get(schedules::handlers::live_schedules),
        )
        .route(
            "/api/schedules/{id}",
            get(schedules::handlers::get_schedule)
                .put(schedules::handlers::update_schedule)
                .delete(schedules::handlers::delete_schedule),
        )
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
