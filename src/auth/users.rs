/**
 * User Model and Database Operations
 *
 * Persisted user records. Emails are stored trimmed and lowercased (callers
 * normalize before reaching here); uniqueness is enforced by the schema, so
 * a duplicate-email race loses with a constraint violation rather than a
 * corrupted record.
 */

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::Role;

pub const DEFAULT_AVATAR: &str =
    "https://gravatar.com/avatar/00000000000000000000000000000000?d=mp&f=y";

/// A user row. The password hash never leaves this module's callers —
/// response types carry `UserProfile` instead.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
}

/// The public view of a user: everything except the credential.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub avatar: String,
    pub date: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            avatar: user.avatar,
            date: user.created_at,
        }
    }
}

/// Insert a new user with the `user` role and default avatar.
pub async fn create_user(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, name, email, password_hash, role, avatar, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING id, name, email, password_hash, role, avatar, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(Role::User)
    .bind(DEFAULT_AVATAR)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(user)
}

pub async fn get_user_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, name, email, password_hash, role, avatar, created_at \
         FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn get_user_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, name, email, password_hash, role, avatar, created_at \
         FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}
