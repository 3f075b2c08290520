/**
 * Token Issue and Verification
 *
 * Stateless session tokens: HS256 JWTs carrying the user id and role plus
 * the standard `iat`/`exp` claims. The keys live in a `TokenService` held
 * by application state — handlers never reach for the environment.
 *
 * Verification failures are classified (`Malformed`, `Expired`,
 * `SignatureInvalid`) for logging and tests, but all three map to the same
 * external 401 so a caller cannot tell which check failed.
 */

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::Role;
use crate::error::ApiError;

/// Claim set embedded in every session token.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id, as a UUID string.
    pub sub: String,
    pub role: Role,
    /// Issued-at (Unix seconds).
    pub iat: i64,
    /// Expiry (Unix seconds).
    pub exp: i64,
}

impl Claims {
    /// Parse the subject back into a user id. A token that verified but
    /// carries a non-UUID subject is treated as malformed.
    pub fn user_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::Malformed)
    }
}

/// Why a token failed verification. Internal only — every variant is
/// answered externally with the same 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is structurally invalid")]
    Malformed,
    #[error("token has expired")]
    Expired,
    #[error("token signature is invalid")]
    SignatureInvalid,
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        tracing::debug!(reason = %err, "rejecting token");
        ApiError::Unauthorized
    }
}

/// Signs and verifies session tokens with a server-held symmetric secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_ref()),
            decoding: DecodingKey::from_secret(secret.as_ref()),
            ttl_secs,
        }
    }

    /// Issue a token for a user with the service's configured lifetime.
    pub fn issue(&self, user_id: Uuid, role: Role) -> Result<String, ApiError> {
        self.issue_with_ttl(user_id, role, self.ttl_secs)
    }

    /// Issue a token with an explicit lifetime in seconds. A negative value
    /// produces an already-expired token, which tests rely on.
    pub fn issue_with_ttl(
        &self,
        user_id: Uuid,
        role: Role,
        ttl_secs: i64,
    ) -> Result<String, ApiError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            role,
            iat: now,
            exp: now + ttl_secs,
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(|err| {
            tracing::error!(error = %err, "failed to sign token");
            ApiError::Internal("failed to sign token".to_string())
        })
    }

    /// Verify signature and expiry, returning the embedded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let validation = Validation::default();
        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|err| {
            use jsonwebtoken::errors::ErrorKind;
            match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
                _ => TokenError::Malformed,
            }
        })?;
        Ok(data.claims)
    }
}
