/**
 * Registration Handler
 *
 * `POST /api/auth/register`:
 *
 * 1. Validate name / email / password (field-level 400s)
 * 2. Normalize the email and pre-check for an existing account
 * 3. Hash the password (bcrypt) and insert the user
 * 4. Issue a session token
 *
 * A concurrent registration with the same email can slip past the
 * pre-check; the UNIQUE constraint catches it and the loser still gets the
 * same 400 conflict, never a 500.
 */

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::auth::handlers::types::{normalize_email, AuthData, RegisterRequest};
use crate::auth::passwords::hash_password;
use crate::auth::users::{create_user, get_user_by_email};
use crate::error::types::is_unique_violation;
use crate::error::ApiError;
use crate::middleware::json::AppJson;
use crate::response::{created, ApiResponse};
use crate::server::state::AppState;

pub async fn register(
    State(state): State<AppState>,
    AppJson(request): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthData>>), ApiError> {
    request.validate().map_err(ApiError::Validation)?;

    let email = normalize_email(&request.email);

    if get_user_by_email(&state.pool, &email).await?.is_some() {
        tracing::debug!(%email, "registration rejected: email taken");
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    let password_hash = hash_password(&request.password)?;

    let user = match create_user(&state.pool, request.name.trim(), &email, &password_hash).await {
        Ok(user) => user,
        // Lost a duplicate-email race after the pre-check.
        Err(err) if is_unique_violation(&err) => {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }
        Err(err) => return Err(err.into()),
    };

    let token = state.tokens.issue(user.id, user.role)?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok(created(
        "User registered successfully",
        AuthData {
            token,
            user: user.into(),
        },
    ))
}
