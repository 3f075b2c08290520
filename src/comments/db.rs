/**
 * Comment Model and Database Operations
 *
 * Listings are newest-first and paginated. All reads join the author name
 * so responses embed `user: {id, name}`.
 */

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::posts::db::Author;

/// A comment as it appears on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
    pub post_id: String,
    pub user: Author,
    pub date: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: Uuid,
    text: String,
    post_id: String,
    user_id: Uuid,
    author_name: String,
    created_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            text: row.text,
            post_id: row.post_id,
            user: Author {
                id: row.user_id,
                name: row.author_name,
            },
            date: row.created_at,
        }
    }
}

const SELECT_COMMENT: &str = "SELECT c.id, c.text, c.post_id, c.user_id, \
     u.name AS author_name, c.created_at \
     FROM comments c JOIN users u ON u.id = c.user_id";

/// Page of comments under one post ref, plus the total for that ref.
pub async fn list_comments_by_post(
    pool: &SqlitePool,
    post_id: &str,
    limit: i64,
    offset: i64,
) -> Result<(Vec<Comment>, i64), sqlx::Error> {
    let rows: Vec<CommentRow> = sqlx::query_as(&format!(
        "{SELECT_COMMENT} WHERE c.post_id = ? ORDER BY c.created_at DESC LIMIT ? OFFSET ?"
    ))
    .bind(post_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE post_id = ?")
        .bind(post_id)
        .fetch_one(pool)
        .await?;

    Ok((rows.into_iter().map(Comment::from).collect(), total))
}

/// Page of all comments across every post (moderation view).
pub async fn list_all_comments(
    pool: &SqlitePool,
    limit: i64,
    offset: i64,
) -> Result<(Vec<Comment>, i64), sqlx::Error> {
    let rows: Vec<CommentRow> = sqlx::query_as(&format!(
        "{SELECT_COMMENT} ORDER BY c.created_at DESC LIMIT ? OFFSET ?"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
        .fetch_one(pool)
        .await?;

    Ok((rows.into_iter().map(Comment::from).collect(), total))
}

pub async fn get_comment(pool: &SqlitePool, id: Uuid) -> Result<Option<Comment>, sqlx::Error> {
    let row: Option<CommentRow> = sqlx::query_as(&format!("{SELECT_COMMENT} WHERE c.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Comment::from))
}

/// Insert a comment owned by `owner_id`; owner and timestamp are stamped
/// server-side.
pub async fn create_comment(
    pool: &SqlitePool,
    owner_id: Uuid,
    post_id: &str,
    text: &str,
) -> Result<Comment, sqlx::Error> {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO comments (id, text, post_id, user_id, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(text)
    .bind(post_id)
    .bind(owner_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    let comment = get_comment(pool, id).await?;
    comment.ok_or(sqlx::Error::RowNotFound)
}

/// Replace the text. Only `text` is mutable — ref, owner, and timestamp are
/// fixed at creation.
pub async fn update_comment(
    pool: &SqlitePool,
    id: Uuid,
    text: &str,
) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query("UPDATE comments SET text = ? WHERE id = ?")
        .bind(text)
        .bind(id)
        .execute(pool)
        .await?;

    get_comment(pool, id).await
}

/// Returns false when there was nothing to delete.
pub async fn delete_comment(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
