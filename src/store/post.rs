use crate::blog::{NewPost, Post, PostID};
use sqlx::SqlitePool;

/// All posts, most recent first. Posts created at the same instant come out
/// in reverse insertion order.
pub async fn all_newest_first(pool: &SqlitePool) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT id, title, body, image, created_at
        FROM posts
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &SqlitePool, post_id: PostID) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT id, title, body, image, created_at
        FROM posts
        WHERE id = ?1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await
}

pub async fn insert(
    pool: &SqlitePool,
    post: &NewPost,
    created_at: chrono::DateTime<chrono::Utc>,
) -> Result<Post, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (title, body, image, created_at)
        VALUES (?1, ?2, ?3, ?4)
        RETURNING id, title, body, image, created_at
        "#,
    )
    .bind(&post.title)
    .bind(&post.body)
    .bind(&post.image)
    .bind(super::timestamp_column(created_at))
    .fetch_one(pool)
    .await
}
