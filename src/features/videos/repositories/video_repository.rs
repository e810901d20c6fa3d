use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::videos::models::{NewVideo, Video, VideoDetailsPatch, VideoMetrics};

/// Store for video records.
///
/// Every method is a single-row read or write. The two update paths own
/// disjoint columns: owner edits go through `update_details`, provider
/// progress through `update_lifecycle`, and neither touches the engagement
/// counters. A stale snapshot written through one path cannot undo a
/// concurrent write made through the other.
#[async_trait]
pub trait VideoRepository: Send + Sync {
    async fn insert(&self, new_video: NewVideo) -> Result<Video>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Video>>;

    async fn find_by_upload_id(&self, upload_id: &str) -> Result<Option<Video>>;

    async fn find_by_asset_id(&self, asset_id: &str) -> Result<Option<Video>>;

    /// All records, newest first
    async fn list(&self) -> Result<Vec<Video>>;

    /// Apply an owner edit to the editable columns only; `None` when the
    /// record does not exist
    async fn update_details(&self, id: Uuid, patch: &VideoDetailsPatch) -> Result<Option<Video>>;

    /// Write status, provider ids, playback id and duration from `video`.
    ///
    /// The write is skipped when it would move the stored status backwards or
    /// sideways between terminal states; the stored record is returned
    /// instead. An asset id already on the record is kept.
    async fn update_lifecycle(&self, video: &Video) -> Result<Video>;

    /// Returns whether a record was removed
    async fn delete(&self, id: Uuid) -> Result<bool>;

    /// Atomically add one view; `None` when the record does not exist
    async fn increment_views(&self, id: Uuid) -> Result<Option<VideoMetrics>>;
}

/// PostgreSQL-backed video store
pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoRepository for PgVideoRepository {
    async fn insert(&self, new_video: NewVideo) -> Result<Video> {
        let video = sqlx::query_as::<_, Video>(
            r#"
            INSERT INTO videos (
                id, title, description, category, tags, visibility,
                author_name, author_id, author_avatar,
                allow_comments, allow_ratings, autoplay, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, 'awaiting_upload')
            RETURNING *
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&new_video.title)
        .bind(&new_video.description)
        .bind(&new_video.category)
        .bind(&new_video.tags)
        .bind(new_video.visibility)
        .bind(&new_video.author_name)
        .bind(&new_video.author_id)
        .bind(&new_video.author_avatar)
        .bind(new_video.allow_comments)
        .bind(new_video.allow_ratings)
        .bind(new_video.autoplay)
        .fetch_one(&self.pool)
        .await?;

        Ok(video)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Video>> {
        let video = sqlx::query_as::<_, Video>("SELECT * FROM videos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(video)
    }

    async fn find_by_upload_id(&self, upload_id: &str) -> Result<Option<Video>> {
        let video = sqlx::query_as::<_, Video>(
            "SELECT * FROM videos WHERE provider_upload_id = $1 ORDER BY created_at DESC LIMIT 1",
        )
        .bind(upload_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(video)
    }

    async fn find_by_asset_id(&self, asset_id: &str) -> Result<Option<Video>> {
        let video = sqlx::query_as::<_, Video>(
            "SELECT * FROM videos WHERE provider_asset_id = $1 ORDER BY created_at DESC LIMIT 1",
        )
        .bind(asset_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(video)
    }

    async fn list(&self) -> Result<Vec<Video>> {
        let videos = sqlx::query_as::<_, Video>("SELECT * FROM videos ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(videos)
    }

    async fn update_details(&self, id: Uuid, patch: &VideoDetailsPatch) -> Result<Option<Video>> {
        let video = sqlx::query_as::<_, Video>(
            r#"
            UPDATE videos
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                tags = COALESCE($5, tags),
                visibility = COALESCE($6, visibility),
                allow_comments = COALESCE($7, allow_comments),
                allow_ratings = COALESCE($8, allow_ratings),
                autoplay = COALESCE($9, autoplay),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&patch.title)
        .bind(&patch.description)
        .bind(&patch.category)
        .bind(&patch.tags)
        .bind(patch.visibility)
        .bind(patch.allow_comments)
        .bind(patch.allow_ratings)
        .bind(patch.autoplay)
        .fetch_optional(&self.pool)
        .await?;
        Ok(video)
    }

    async fn update_lifecycle(&self, video: &Video) -> Result<Video> {
        let updated = sqlx::query_as::<_, Video>(
            r#"
            UPDATE videos
            SET status = $2,
                provider_upload_id = COALESCE($3, provider_upload_id),
                provider_asset_id = COALESCE(provider_asset_id, $4),
                playback_id = $5,
                duration = $6,
                updated_at = NOW()
            WHERE id = $1
              AND (status = $2 OR video_status_stage($2) > video_status_stage(status))
            RETURNING *
            "#,
        )
        .bind(video.id)
        .bind(video.status)
        .bind(&video.provider_upload_id)
        .bind(&video.provider_asset_id)
        .bind(&video.playback_id)
        .bind(video.duration)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(video) => Ok(video),
            // Either gone or already past this status
            None => self
                .find_by_id(video.id)
                .await?
                .ok_or_else(|| AppError::NotFound("Video not found".to_string())),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn increment_views(&self, id: Uuid) -> Result<Option<VideoMetrics>> {
        let metrics = sqlx::query_as::<_, VideoMetrics>(
            r#"
            UPDATE videos
            SET views = views + 1
            WHERE id = $1
            RETURNING views, likes, shares
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(metrics)
    }
}
