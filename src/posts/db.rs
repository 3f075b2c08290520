/**
 * Post Model and Database Operations
 *
 * Listing is filtered by category, sorted newest-first, and paginated.
 * Every read joins the author's display name so responses can embed
 * `user: {id, name}` without a second query.
 */

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::domain::Sport;

pub const DEFAULT_POST_IMAGE: &str = "https://via.placeholder.com/800x400";

/// Owner reference embedded in post and comment responses.
#[derive(Debug, Clone, Serialize)]
pub struct Author {
    pub id: Uuid,
    pub name: String,
}

/// A post as it appears on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: Sport,
    pub image_url: String,
    pub user: Author,
    pub views: i64,
    pub date: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    title: String,
    content: String,
    category: Sport,
    image_url: String,
    user_id: Uuid,
    author_name: String,
    views: i64,
    created_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            title: row.title,
            content: row.content,
            category: row.category,
            image_url: row.image_url,
            user: Author {
                id: row.user_id,
                name: row.author_name,
            },
            views: row.views,
            date: row.created_at,
        }
    }
}

/// Fields of a new post, validated by the handler before reaching here.
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub category: Sport,
    pub image_url: String,
}

/// Partial update: `None` leaves the column unchanged.
#[derive(Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<Sport>,
    pub image_url: Option<String>,
}

const SELECT_POST: &str = "SELECT p.id, p.title, p.content, p.category, p.image_url, \
     p.user_id, u.name AS author_name, p.views, p.created_at \
     FROM posts p JOIN users u ON u.id = p.user_id";

/// Page of posts (newest first) plus the unpaginated total.
pub async fn list_posts(
    pool: &SqlitePool,
    category: Option<Sport>,
    limit: i64,
    offset: i64,
) -> Result<(Vec<Post>, i64), sqlx::Error> {
    let mut query = QueryBuilder::<Sqlite>::new(SELECT_POST);
    if let Some(category) = category {
        query.push(" WHERE p.category = ").push_bind(category);
    }
    query
        .push(" ORDER BY p.created_at DESC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);

    let rows: Vec<PostRow> = query.build_query_as().fetch_all(pool).await?;

    let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM posts");
    if let Some(category) = category {
        count.push(" WHERE category = ").push_bind(category);
    }
    let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

    Ok((rows.into_iter().map(Post::from).collect(), total))
}

pub async fn get_post(pool: &SqlitePool, id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let row: Option<PostRow> = sqlx::query_as(&format!("{SELECT_POST} WHERE p.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Post::from))
}

/// Bump the read counter. Returns false when the post does not exist.
pub async fn increment_views(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE posts SET views = views + 1 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Insert a post owned by `owner_id`. The owner and creation timestamp are
/// stamped here — a client-supplied owner is never trusted.
pub async fn create_post(
    pool: &SqlitePool,
    owner_id: Uuid,
    new_post: NewPost,
) -> Result<Post, sqlx::Error> {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO posts (id, title, content, category, image_url, user_id, views, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, 0, ?)",
    )
    .bind(id)
    .bind(&new_post.title)
    .bind(&new_post.content)
    .bind(new_post.category)
    .bind(&new_post.image_url)
    .bind(owner_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    // Re-read through the author join.
    let post = get_post(pool, id).await?;
    post.ok_or(sqlx::Error::RowNotFound)
}

/// Apply the provided fields; absent fields keep their current value.
pub async fn update_post(
    pool: &SqlitePool,
    id: Uuid,
    changes: PostChanges,
) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query(
        "UPDATE posts SET \
           title = COALESCE(?, title), \
           content = COALESCE(?, content), \
           category = COALESCE(?, category), \
           image_url = COALESCE(?, image_url) \
         WHERE id = ?",
    )
    .bind(changes.title)
    .bind(changes.content)
    .bind(changes.category)
    .bind(changes.image_url)
    .bind(id)
    .execute(pool)
    .await?;

    get_post(pool, id).await
}

/// Returns false when there was nothing to delete.
pub async fn delete_post(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
