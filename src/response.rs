/**
 * Response Envelope and Pagination
 *
 * Every endpoint — success or failure — returns the same JSON shape:
 *
 * ```json
 * {
 *   "success": true,
 *   "message": "Posts retrieved successfully",
 *   "data": { ... },
 *   "timestamp": "2026-08-27T12:00:00Z"
 * }
 * ```
 *
 * Clients branch on `success` uniformly; `data` is `null` on failures
 * (except validation errors, which carry the field-error list).
 *
 * Paginated listings wrap their items with `Pagination` where
 * `pages = ceil(total / limit)`. Requesting a page past the end is not an
 * error: it yields an empty item list with `success = true`.
 */

use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The uniform response wrapper.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn new(success: bool, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            success,
            message: message.into(),
            data,
            timestamp: Utc::now(),
        }
    }
}

/// 200 envelope with data.
pub fn ok<T>(message: &str, data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (StatusCode::OK, Json(ApiResponse::new(true, message, Some(data))))
}

/// 201 envelope with data.
pub fn created<T>(message: &str, data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (StatusCode::CREATED, Json(ApiResponse::new(true, message, Some(data))))
}

/// 200 envelope with `data: null` (deletes).
pub fn ok_empty(message: &str) -> (StatusCode, Json<ApiResponse<()>>) {
    (StatusCode::OK, Json(ApiResponse::new(true, message, None)))
}

/// Pagination block attached to every listing response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub pages: i64,
}

impl Pagination {
    pub fn new(total: i64, page: i64, limit: i64) -> Self {
        let pages = if limit > 0 { (total + limit - 1) / limit } else { 0 };
        Self { total, page, limit, pages }
    }
}

/// Largest page size a client may request.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Parse a `page` query value. Junk or missing input falls back to page 1,
/// mirroring the original API's lenient `parseInt || 1` behavior.
pub fn parse_page(raw: &Option<String>) -> i64 {
    raw.as_deref()
        .and_then(|s| s.parse::<i64>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

/// Parse a `limit` query value, falling back to the per-resource default and
/// clamping to `1..=MAX_PAGE_LIMIT`.
pub fn parse_limit(raw: &Option<String>, default: i64) -> i64 {
    raw.as_deref()
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(default)
        .clamp(1, MAX_PAGE_LIMIT)
}

/// Row offset for a 1-based page. Saturating: `parse_page` accepts any
/// `i64 >= 1`, and an absurd page must read as an empty page, not an
/// arithmetic overflow.
pub fn page_offset(page: i64, limit: i64) -> i64 {
    page.saturating_sub(1).saturating_mul(limit)
}
