/**
 * Post Handlers
 *
 * - `GET    /api/posts`       public; `?category=&page=&limit=`
 * - `GET    /api/posts/{id}`  public; bumps the view counter
 * - `POST   /api/posts`       token required
 * - `PUT    /api/posts/{id}`  owner or admin
 * - `DELETE /api/posts/{id}`  owner or admin
 *
 * A malformed id is indistinguishable from a missing post: both are 404.
 */

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Sport;
use crate::error::{ApiError, FieldError};
use crate::middleware::auth::{ensure_owner_or_admin, CurrentUser};
use crate::middleware::json::AppJson;
use crate::posts::db;
use crate::posts::db::{Post, DEFAULT_POST_IMAGE};
use crate::response::{
    created, ok, ok_empty, page_offset, parse_limit, parse_page, ApiResponse, Pagination,
};
use crate::server::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 10;

fn parse_post_id(raw: &str) -> Result<Uuid, ApiError> {
    // A malformed id leaks nothing: same 404 as a genuine miss.
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound("Post"))
}

fn parse_category(raw: &str) -> Result<Sport, ApiError> {
    raw.parse::<Sport>().map_err(|_| {
        ApiError::invalid_field(
            "category",
            "Category must be one of: Football, Basketball, Baseball, Hockey, Soccer, Tennis, Golf, Other",
        )
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct PostListQuery {
    pub category: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PostListData {
    pub posts: Vec<Post>,
    pub pagination: Pagination,
}

pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PostListQuery>,
) -> Result<(StatusCode, Json<ApiResponse<PostListData>>), ApiError> {
    let category = match query.category.as_deref().filter(|c| !c.is_empty()) {
        Some(raw) => Some(parse_category(raw)?),
        None => None,
    };
    let page = parse_page(&query.page);
    let limit = parse_limit(&query.limit, DEFAULT_PAGE_SIZE);

    let (posts, total) =
        db::list_posts(&state.pool, category, limit, page_offset(page, limit)).await?;

    Ok(ok(
        "Posts retrieved successfully",
        PostListData {
            posts,
            pagination: Pagination::new(total, page, limit),
        },
    ))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<(StatusCode, Json<ApiResponse<Post>>), ApiError> {
    let id = parse_post_id(&raw_id)?;

    if !db::increment_views(&state.pool, id).await? {
        return Err(ApiError::NotFound("Post"));
    }
    let post = db::get_post(&state.pool, id)
        .await?
        .ok_or(ApiError::NotFound("Post"))?;

    Ok(ok("Post retrieved successfully", post))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: String,
    pub image_url: Option<String>,
}

impl CreatePostRequest {
    fn validate(&self) -> Result<Sport, ApiError> {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push(FieldError::new("title", "Title is required"));
        }
        if self.content.trim().is_empty() {
            errors.push(FieldError::new("content", "Content is required"));
        }
        let category = match parse_category(&self.category) {
            Ok(category) => Some(category),
            Err(ApiError::Validation(mut category_errors)) => {
                errors.append(&mut category_errors);
                None
            }
            Err(other) => return Err(other),
        };
        match (category, errors.is_empty()) {
            (Some(category), true) => Ok(category),
            _ => Err(ApiError::Validation(errors)),
        }
    }
}

pub async fn create_post(
    State(state): State<AppState>,
    current: CurrentUser,
    AppJson(request): AppJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Post>>), ApiError> {
    let category = request.validate()?;

    let post = db::create_post(
        &state.pool,
        current.user_id,
        db::NewPost {
            title: request.title.trim().to_string(),
            content: request.content,
            category,
            image_url: request
                .image_url
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_POST_IMAGE.to_string()),
        },
    )
    .await?;

    tracing::info!(post_id = %post.id, user_id = %current.user_id, "post created");

    Ok(created("Post created successfully", post))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
}

impl UpdatePostRequest {
    fn validate(&self) -> Result<Option<Sport>, ApiError> {
        let mut errors = Vec::new();
        if matches!(&self.title, Some(title) if title.trim().is_empty()) {
            errors.push(FieldError::new("title", "Title is required"));
        }
        if matches!(&self.content, Some(content) if content.trim().is_empty()) {
            errors.push(FieldError::new("content", "Content is required"));
        }
        let category = match self.category.as_deref() {
            Some(raw) => match parse_category(raw) {
                Ok(category) => Some(category),
                Err(ApiError::Validation(mut category_errors)) => {
                    errors.append(&mut category_errors);
                    None
                }
                Err(other) => return Err(other),
            },
            None => None,
        };
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }
        Ok(category)
    }
}

pub async fn update_post(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(raw_id): Path<String>,
    AppJson(request): AppJson<UpdatePostRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Post>>), ApiError> {
    let id = parse_post_id(&raw_id)?;
    let category = request.validate()?;

    let existing = db::get_post(&state.pool, id)
        .await?
        .ok_or(ApiError::NotFound("Post"))?;
    ensure_owner_or_admin(existing.user.id, &current, "update", "post")?;

    let post = db::update_post(
        &state.pool,
        id,
        db::PostChanges {
            title: request.title,
            content: request.content,
            category,
            image_url: request.image_url,
        },
    )
    .await?
    .ok_or(ApiError::NotFound("Post"))?;

    Ok(ok("Post updated successfully", post))
}

pub async fn delete_post(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(raw_id): Path<String>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), ApiError> {
    let id = parse_post_id(&raw_id)?;

    let existing = db::get_post(&state.pool, id)
        .await?
        .ok_or(ApiError::NotFound("Post"))?;
    ensure_owner_or_admin(existing.user.id, &current, "delete", "post")?;

    if !db::delete_post(&state.pool, id).await? {
        return Err(ApiError::NotFound("Post"));
    }

    tracing::info!(post_id = %id, user_id = %current.user_id, "post deleted");

    Ok(ok_empty("Post deleted successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_requires_all_fields() {
        let request = CreatePostRequest {
            title: " ".into(),
            content: "".into(),
            category: "Skiing".into(),
            image_url: None,
        };
        match request.validate() {
            Err(ApiError::Validation(errors)) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["title", "content", "category"]);
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn create_request_accepts_valid_input() {
        let request = CreatePostRequest {
            title: "Opening night".into(),
            content: "Tip-off at seven.".into(),
            category: "Basketball".into(),
            image_url: None,
        };
        assert_eq!(request.validate().unwrap(), Sport::Basketball);
    }

    #[test]
    fn update_request_allows_partial_bodies() {
        let request = UpdatePostRequest {
            title: None,
            content: Some("Revised recap".into()),
            category: None,
            image_url: None,
        };
        assert_eq!(request.validate().unwrap(), None);
    }

    #[test]
    fn update_request_rejects_blanking_required_fields() {
        let request = UpdatePostRequest {
            title: Some("".into()),
            content: None,
            category: None,
            image_url: None,
        };
        assert!(matches!(request.validate(), Err(ApiError::Validation(_))));
    }

    #[test]
    fn malformed_ids_read_as_missing() {
        assert!(matches!(
            parse_post_id("not-a-uuid"),
            Err(ApiError::NotFound("Post"))
        ));
    }
}
