/**
 * Auth Request/Response Types
 *
 * Request bodies are explicit structs validated before any business logic
 * runs; violations come back as a 400 with field-level detail, never as an
 * exception path.
 */

use serde::Deserialize;
use serde::Serialize;

use crate::auth::users::UserProfile;
use crate::error::FieldError;

/// Body of `POST /api/auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "Name is required"));
        }
        if !is_valid_email(self.email.trim()) {
            errors.push(FieldError::new("email", "Please include a valid email"));
        }
        if self.password.len() < 6 {
            errors.push(FieldError::new(
                "password",
                "Please enter a password with 6 or more characters",
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Body of `POST /api/auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if !is_valid_email(self.email.trim()) {
            errors.push(FieldError::new("email", "Please include a valid email"));
        }
        if self.password.is_empty() {
            errors.push(FieldError::new("password", "Password is required"));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Data payload returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthData {
    pub token: String,
    pub user: UserProfile,
}

/// Login keys are emails, compared case-insensitively: trim and lowercase
/// before every read or write.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Structural email check: one `@`, non-empty local part, a dot in the
/// domain, no whitespace. Deliverability is not our problem.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
        && !domain.contains('@')
}
