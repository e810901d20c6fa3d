use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::videos::dtos::{UpdateVideoMetadataDto, VideoMetricsDto};
use crate::features::videos::models::{Video, VideoDetailsPatch};
use crate::features::videos::repositories::VideoRepository;

/// Service for catalogue reads and owner edits
pub struct VideoService {
    videos: Arc<dyn VideoRepository>,
}

impl VideoService {
    pub fn new(videos: Arc<dyn VideoRepository>) -> Self {
        Self { videos }
    }

    /// List all videos, newest first
    pub async fn list(&self) -> Result<Vec<Video>> {
        self.videos.list().await
    }

    /// Get video by ID
    pub async fn get(&self, id: Uuid) -> Result<Video> {
        self.videos
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))
    }

    /// Apply a whitelisted metadata update.
    ///
    /// Lifecycle fields (status, provider ids, playback id, duration) and the
    /// engagement counters cannot be set from here.
    pub async fn update_metadata(&self, id: Uuid, dto: UpdateVideoMetadataDto) -> Result<Video> {
        let patch = VideoDetailsPatch::from(dto);
        let video = self
            .videos
            .update_details(id, &patch)
            .await?
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

        tracing::info!("Updated metadata for video {}", video.id);
        Ok(video)
    }

    /// Count one view
    pub async fn record_view(&self, id: Uuid) -> Result<VideoMetricsDto> {
        self.videos
            .increment_views(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))
    }
}
