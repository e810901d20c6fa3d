use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::comments::models::{Comment, NewComment};

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn insert(&self, new_comment: NewComment) -> Result<Comment>;

    /// Comments on a video, newest first
    async fn list_for_video(&self, video_id: Uuid) -> Result<Vec<Comment>>;
}

/// PostgreSQL-backed comment store. Rows are removed with their video by
/// the foreign key cascade.
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn insert(&self, new_comment: NewComment) -> Result<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (id, video_id, author_name, author_id, author_avatar, content)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(new_comment.video_id)
        .bind(&new_comment.author.name)
        .bind(&new_comment.author.id)
        .bind(&new_comment.author.avatar)
        .bind(&new_comment.content)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn list_for_video(&self, video_id: Uuid) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            "SELECT * FROM comments WHERE video_id = $1 ORDER BY created_at DESC",
        )
        .bind(video_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }
}
