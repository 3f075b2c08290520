/**
 * Comment Handlers
 *
 * - `GET    /api/comments`           admin only; moderation view, page size 20
 * - `GET    /api/comments/{postId}`  public; comments under one post ref
 * - `POST   /api/comments/{postId}`  token required
 * - `PUT    /api/comments/{id}`      owner or admin
 * - `DELETE /api/comments/{id}`      owner or admin
 *
 * `{postId}` is the string post ref (`basketball-news-1`); `{id}` on PUT and
 * DELETE is a comment UUID. Because comments are referentially independent
 * of posts, listing an unknown ref is an empty 200, not a 404.
 */

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::comments::db;
use crate::comments::db::Comment;
use crate::error::{ApiError, FieldError};
use crate::middleware::auth::{ensure_owner_or_admin, AdminUser, CurrentUser};
use crate::middleware::json::AppJson;
use crate::response::{
    created, ok, ok_empty, page_offset, parse_limit, parse_page, ApiResponse, Pagination,
};
use crate::server::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 10;
const ADMIN_PAGE_SIZE: i64 = 20;
const MAX_COMMENT_CHARS: usize = 1000;

/// Post refs follow `category-type-number`, all lowercase, e.g.
/// `football-news-1`.
pub fn is_valid_post_ref(post_ref: &str) -> bool {
    let mut parts = post_ref.split('-');
    let (Some(category), Some(kind), Some(number), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    let alpha = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_lowercase());
    alpha(category)
        && alpha(kind)
        && !number.is_empty()
        && number.chars().all(|c| c.is_ascii_digit())
}

fn require_post_ref(post_ref: &str) -> Result<(), ApiError> {
    if is_valid_post_ref(post_ref) {
        return Ok(());
    }
    Err(ApiError::invalid_field(
        "postId",
        "Post ID must match the form category-type-number, e.g. basketball-news-1",
    ))
}

fn parse_comment_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound("Comment"))
}

#[derive(Debug, Default, Deserialize)]
pub struct CommentListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CommentListData {
    pub comments: Vec<Comment>,
    pub pagination: Pagination,
}

/// Moderation view: every comment on the site, newest first.
pub async fn list_all_comments(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<CommentListQuery>,
) -> Result<(StatusCode, Json<ApiResponse<CommentListData>>), ApiError> {
    let page = parse_page(&query.page);
    let limit = parse_limit(&query.limit, ADMIN_PAGE_SIZE);

    let (comments, total) =
        db::list_all_comments(&state.pool, limit, page_offset(page, limit)).await?;

    Ok(ok(
        "Comments retrieved successfully",
        CommentListData {
            comments,
            pagination: Pagination::new(total, page, limit),
        },
    ))
}

pub async fn list_comments_by_post(
    State(state): State<AppState>,
    Path(post_ref): Path<String>,
    Query(query): Query<CommentListQuery>,
) -> Result<(StatusCode, Json<ApiResponse<CommentListData>>), ApiError> {
    let page = parse_page(&query.page);
    let limit = parse_limit(&query.limit, DEFAULT_PAGE_SIZE);

    let (comments, total) =
        db::list_comments_by_post(&state.pool, &post_ref, limit, page_offset(page, limit)).await?;

    Ok(ok(
        "Comments retrieved successfully",
        CommentListData {
            comments,
            pagination: Pagination::new(total, page, limit),
        },
    ))
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    #[serde(default)]
    pub text: String,
}

impl CommentRequest {
    /// Bounded, non-empty text; returns the trimmed form to store.
    fn validate(&self) -> Result<&str, ApiError> {
        let text = self.text.trim();
        let mut errors = Vec::new();
        if text.is_empty() {
            errors.push(FieldError::new("text", "Text is required"));
        }
        if text.chars().count() > MAX_COMMENT_CHARS {
            errors.push(FieldError::new(
                "text",
                "Comment cannot exceed 1000 characters",
            ));
        }
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }
        Ok(text)
    }
}

pub async fn add_comment(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(post_ref): Path<String>,
    AppJson(request): AppJson<CommentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Comment>>), ApiError> {
    require_post_ref(&post_ref)?;
    let text = request.validate()?;

    let comment = db::create_comment(&state.pool, current.user_id, &post_ref, text).await?;

    tracing::info!(comment_id = %comment.id, post_ref, user_id = %current.user_id, "comment added");

    Ok(created("Comment added successfully", comment))
}

pub async fn update_comment(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(raw_id): Path<String>,
    AppJson(request): AppJson<CommentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Comment>>), ApiError> {
    let id = parse_comment_id(&raw_id)?;
    let text = request.validate()?;

    let existing = db::get_comment(&state.pool, id)
        .await?
        .ok_or(ApiError::NotFound("Comment"))?;
    ensure_owner_or_admin(existing.user.id, &current, "update", "comment")?;

    let comment = db::update_comment(&state.pool, id, text)
        .await?
        .ok_or(ApiError::NotFound("Comment"))?;

    Ok(ok("Comment updated successfully", comment))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(raw_id): Path<String>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), ApiError> {
    let id = parse_comment_id(&raw_id)?;

    let existing = db::get_comment(&state.pool, id)
        .await?
        .ok_or(ApiError::NotFound("Comment"))?;
    ensure_owner_or_admin(existing.user.id, &current, "delete", "comment")?;

    if !db::delete_comment(&state.pool, id).await? {
        return Err(ApiError::NotFound("Comment"));
    }

    tracing::info!(comment_id = %id, user_id = %current.user_id, "comment deleted");

    Ok(ok_empty("Comment deleted successfully"))
}
