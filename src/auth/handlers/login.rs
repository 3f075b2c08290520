/**
 * Login Handler
 *
 * `POST /api/auth/login`: look the user up by normalized email and verify
 * the password hash. Unknown email and wrong password produce the identical
 * 400 "Invalid credentials" — nothing in the response reveals which check
 * failed.
 */

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::auth::handlers::types::{normalize_email, AuthData, LoginRequest};
use crate::auth::passwords::verify_password;
use crate::auth::users::get_user_by_email;
use crate::error::ApiError;
use crate::middleware::json::AppJson;
use crate::response::{ok, ApiResponse};
use crate::server::state::AppState;

pub async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthData>>), ApiError> {
    request.validate().map_err(ApiError::Validation)?;

    let email = normalize_email(&request.email);

    let user = get_user_by_email(&state.pool, &email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !verify_password(&request.password, &user.password_hash) {
        tracing::debug!(user_id = %user.id, "login rejected: password mismatch");
        return Err(ApiError::InvalidCredentials);
    }

    let token = state.tokens.issue(user.id, user.role)?;

    tracing::info!(user_id = %user.id, "user logged in");

    Ok(ok(
        "Login successful",
        AuthData {
            token,
            user: user.into(),
        },
    ))
}
