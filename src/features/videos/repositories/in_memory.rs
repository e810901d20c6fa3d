use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use super::VideoRepository;
use crate::core::error::{AppError, Result};
use crate::features::videos::models::{
    NewVideo, ThumbnailKind, Video, VideoDetailsPatch, VideoMetrics, VideoStatus,
};

/// HashMap-backed store used by tests
#[derive(Default)]
pub struct InMemoryVideoRepository {
    videos: Mutex<HashMap<Uuid, Video>>,
}

impl InMemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.videos.lock().unwrap().len()
    }

    /// Read a record without going through the trait
    pub fn get(&self, id: Uuid) -> Option<Video> {
        self.videos.lock().unwrap().get(&id).cloned()
    }

    /// Store a record as-is
    pub fn put(&self, video: Video) {
        self.videos.lock().unwrap().insert(video.id, video);
    }
}

#[async_trait]
impl VideoRepository for InMemoryVideoRepository {
    async fn insert(&self, new_video: NewVideo) -> Result<Video> {
        let now = Utc::now();
        let video = Video {
            id: Uuid::now_v7(),
            title: new_video.title,
            description: new_video.description,
            category: new_video.category,
            tags: new_video.tags,
            visibility: new_video.visibility,
            author_name: new_video.author_name,
            author_id: new_video.author_id,
            author_avatar: new_video.author_avatar,
            allow_comments: new_video.allow_comments,
            allow_ratings: new_video.allow_ratings,
            autoplay: new_video.autoplay,
            thumbnail_url: None,
            thumbnail_kind: ThumbnailKind::Auto,
            views: 0,
            likes: 0,
            shares: 0,
            status: VideoStatus::AwaitingUpload,
            provider_upload_id: None,
            provider_asset_id: None,
            playback_id: None,
            duration: None,
            created_at: now,
            updated_at: now,
        };
        self.put(video.clone());
        Ok(video)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Video>> {
        Ok(self.get(id))
    }

    async fn find_by_upload_id(&self, upload_id: &str) -> Result<Option<Video>> {
        Ok(self
            .videos
            .lock()
            .unwrap()
            .values()
            .find(|v| v.provider_upload_id.as_deref() == Some(upload_id))
            .cloned())
    }

    async fn find_by_asset_id(&self, asset_id: &str) -> Result<Option<Video>> {
        Ok(self
            .videos
            .lock()
            .unwrap()
            .values()
            .find(|v| v.provider_asset_id.as_deref() == Some(asset_id))
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Video>> {
        let mut videos: Vec<Video> = self.videos.lock().unwrap().values().cloned().collect();
        videos.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(videos)
    }

    async fn update_details(&self, id: Uuid, patch: &VideoDetailsPatch) -> Result<Option<Video>> {
        Ok(self.videos.lock().unwrap().get_mut(&id).map(|stored| {
            patch.apply(stored);
            stored.updated_at = Utc::now();
            stored.clone()
        }))
    }

    async fn update_lifecycle(&self, video: &Video) -> Result<Video> {
        let mut videos = self.videos.lock().unwrap();
        let stored = videos
            .get_mut(&video.id)
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;
        if !stored.status.can_advance_to(video.status) {
            return Ok(stored.clone());
        }

        stored.status = video.status;
        if video.provider_upload_id.is_some() {
            stored.provider_upload_id = video.provider_upload_id.clone();
        }
        if stored.provider_asset_id.is_none() {
            stored.provider_asset_id = video.provider_asset_id.clone();
        }
        stored.playback_id = video.playback_id.clone();
        stored.duration = video.duration;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.videos.lock().unwrap().remove(&id).is_some())
    }

    async fn increment_views(&self, id: Uuid) -> Result<Option<VideoMetrics>> {
        Ok(self.videos.lock().unwrap().get_mut(&id).map(|v| {
            v.views += 1;
            v.metrics()
        }))
    }
}
