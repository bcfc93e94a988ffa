use crate::blog::{Comment, NewComment, PostID};
use sqlx::SqlitePool;

/// Comments on a post, oldest first
pub async fn for_post(pool: &SqlitePool, post_id: PostID) -> Result<Vec<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, post_id, name, body, created_at
        FROM comments
        WHERE post_id = ?1
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await
}

/// Fails with a foreign key violation if `post_id` does not exist
pub async fn insert(
    pool: &SqlitePool,
    post_id: PostID,
    comment: &NewComment,
    created_at: chrono::DateTime<chrono::Utc>,
) -> Result<Comment, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (post_id, name, body, created_at)
        VALUES (?1, ?2, ?3, ?4)
        RETURNING id, post_id, name, body, created_at
        "#,
    )
    .bind(post_id)
    .bind(&comment.name)
    .bind(&comment.body)
    .bind(super::timestamp_column(created_at))
    .fetch_one(pool)
    .await
}
