/**
 * Authorization Guards
 *
 * Typed extractors that gate handlers:
 *
 * - `CurrentUser` - requires a valid session token; any failure (missing,
 *   malformed, expired, bad signature) is the same 401.
 * - `AdminUser` - additionally requires the `admin` role; 403 otherwise.
 *
 * plus `ensure_owner_or_admin`, the ownership tie-break used by update and
 * delete handlers: an admin identity always wins regardless of ownership,
 * a non-admin must own the resource, and the rejection is always 403 —
 * 401 is reserved for "not authenticated at all".
 *
 * Tokens ride in `Authorization: Bearer <token>`. The bare `x-auth-token`
 * header used by older clients of this API is accepted as a fallback.
 */

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::auth::tokens::TokenService;
use crate::domain::Role;
use crate::error::ApiError;

/// Identity proven by the request's token.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub role: Role,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Pull the bare token out of the request headers, preferring the standard
/// bearer form.
fn extract_token(parts: &Parts) -> Option<&str> {
    if let Some(value) = parts.headers.get(AUTHORIZATION) {
        let value = value.to_str().ok()?;
        return value.strip_prefix("Bearer ").map(str::trim);
    }
    parts
        .headers
        .get("x-auth-token")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    TokenService: axum::extract::FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(token) = extract_token(parts) else {
            tracing::debug!("request without a usable auth header");
            return Err(ApiError::Unauthorized);
        };

        let tokens = TokenService::from_ref(state);
        let claims = tokens.verify(token)?;
        let user_id = claims.user_id()?;

        Ok(CurrentUser {
            user_id,
            role: claims.role,
        })
    }
}

use axum::extract::FromRef;

/// A `CurrentUser` whose role is `admin`.
#[derive(Debug, Clone, Copy)]
pub struct AdminUser(pub CurrentUser);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    TokenService: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let current = CurrentUser::from_request_parts(parts, state).await?;
        if !current.is_admin() {
            tracing::debug!(user_id = %current.user_id, "admin-only route rejected");
            return Err(ApiError::Forbidden(
                "Access denied. Admin role required".to_string(),
            ));
        }
        Ok(AdminUser(current))
    }
}

/// Ownership check with admin override. `action` and `resource` only shape
/// the rejection message, e.g. "Not authorized to update this comment".
pub fn ensure_owner_or_admin(
    owner_id: Uuid,
    current: &CurrentUser,
    action: &str,
    resource: &str,
) -> Result<(), ApiError> {
    if current.is_admin() || current.user_id == owner_id {
        return Ok(());
    }
    Err(ApiError::Forbidden(format!(
        "Not authorized to {action} this {resource}"
    )))
}
