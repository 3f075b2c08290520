//! `GET /api/auth/me` — the caller's own profile, password hash excluded.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::auth::users::{get_user_by_id, UserProfile};
use crate::error::ApiError;
use crate::middleware::auth::CurrentUser;
use crate::response::{ok, ApiResponse};
use crate::server::state::AppState;

pub async fn me(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<(StatusCode, Json<ApiResponse<UserProfile>>), ApiError> {
    let user = get_user_by_id(&state.pool, current.user_id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    Ok(ok("User retrieved successfully", user.into()))
}
