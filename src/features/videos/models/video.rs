use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use tracing::warn;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::video_provider::{AssetStatus, ProviderAsset};

/// Video lifecycle status matching database enum
///
/// Moves forward only: `awaiting_upload -> processing -> ready | error`.
/// `uploading` exists for clients that show an optimistic state while bytes
/// are in flight; the backend never writes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "video_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VideoStatus {
    AwaitingUpload,
    Uploading,
    Processing,
    Ready,
    Error,
}

impl VideoStatus {
    fn stage(self) -> u8 {
        match self {
            VideoStatus::AwaitingUpload | VideoStatus::Uploading => 0,
            VideoStatus::Processing => 1,
            VideoStatus::Ready | VideoStatus::Error => 2,
        }
    }

    /// Whether a record in this status may be moved to `next`.
    /// Re-entering the current status is allowed so redelivered events overwrite in place.
    pub fn can_advance_to(self, next: VideoStatus) -> bool {
        self == next || next.stage() > self.stage()
    }

    pub fn is_terminal(self) -> bool {
        self.stage() == 2
    }
}

impl std::fmt::Display for VideoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VideoStatus::AwaitingUpload => write!(f, "awaiting_upload"),
            VideoStatus::Uploading => write!(f, "uploading"),
            VideoStatus::Processing => write!(f, "processing"),
            VideoStatus::Ready => write!(f, "ready"),
            VideoStatus::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema, Default)]
#[sqlx(type_name = "video_visibility", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VideoVisibility {
    #[default]
    Public,
    Private,
    Unlisted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema, Default)]
#[sqlx(type_name = "thumbnail_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ThumbnailKind {
    /// Generated by the provider
    #[default]
    Auto,
    Custom,
}

/// Database model for a video record
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Video {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub visibility: VideoVisibility,
    pub author_name: String,
    pub author_id: String,
    pub author_avatar: Option<String>,
    pub allow_comments: bool,
    pub allow_ratings: bool,
    pub autoplay: bool,
    pub thumbnail_url: Option<String>,
    pub thumbnail_kind: ThumbnailKind,
    pub views: i64,
    pub likes: i64,
    pub shares: i64,
    pub status: VideoStatus,
    pub provider_upload_id: Option<String>,
    pub provider_asset_id: Option<String>,
    pub playback_id: Option<String>,
    pub duration: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when a record is first persisted
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub visibility: VideoVisibility,
    pub author_name: String,
    pub author_id: String,
    pub author_avatar: Option<String>,
    pub allow_comments: bool,
    pub allow_ratings: bool,
    pub autoplay: bool,
}

/// Owner-editable fields; `None` leaves the stored value alone
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoDetailsPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub visibility: Option<VideoVisibility>,
    pub allow_comments: Option<bool>,
    pub allow_ratings: Option<bool>,
    pub autoplay: Option<bool>,
}

impl VideoDetailsPatch {
    pub fn apply(&self, video: &mut Video) {
        if let Some(title) = &self.title {
            video.title = title.clone();
        }
        if let Some(description) = &self.description {
            video.description = description.clone();
        }
        if let Some(category) = &self.category {
            video.category = category.clone();
        }
        if let Some(tags) = &self.tags {
            video.tags = tags.clone();
        }
        if let Some(visibility) = self.visibility {
            video.visibility = visibility;
        }
        if let Some(allow_comments) = self.allow_comments {
            video.allow_comments = allow_comments;
        }
        if let Some(allow_ratings) = self.allow_ratings {
            video.allow_ratings = allow_ratings;
        }
        if let Some(autoplay) = self.autoplay {
            video.autoplay = autoplay;
        }
    }
}

/// Engagement counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct VideoMetrics {
    pub views: i64,
    pub likes: i64,
    pub shares: i64,
}

impl Video {
    pub fn metrics(&self) -> VideoMetrics {
        VideoMetrics {
            views: self.views,
            likes: self.likes,
            shares: self.shares,
        }
    }

    /// Record the provider asset id. It is written once and never replaced.
    pub fn attach_asset(&mut self, asset_id: &str) -> bool {
        match self.provider_asset_id.as_deref() {
            None => {
                self.provider_asset_id = Some(asset_id.to_string());
                true
            }
            Some(existing) if existing == asset_id => false,
            Some(existing) => {
                warn!(
                    "Video {} already bound to asset {}, ignoring asset {}",
                    self.id, existing, asset_id
                );
                false
            }
        }
    }

    pub fn mark_processing(&mut self) -> bool {
        if self.status == VideoStatus::Processing
            || !self.status.can_advance_to(VideoStatus::Processing)
        {
            return false;
        }
        self.status = VideoStatus::Processing;
        true
    }

    /// Move to `ready`, overwriting duration and playback id.
    ///
    /// A ready event without a duration or playback id still moves the record
    /// to `ready`; the missing fields are left empty.
    pub fn mark_ready(&mut self, duration: Option<f64>, playback_id: Option<String>) -> bool {
        if !self.status.can_advance_to(VideoStatus::Ready) {
            return false;
        }
        let before = (self.status, self.duration, self.playback_id.clone());
        self.status = VideoStatus::Ready;
        self.duration = duration;
        self.playback_id = playback_id;
        before != (self.status, self.duration, self.playback_id.clone())
    }

    pub fn mark_errored(&mut self) -> bool {
        if self.status == VideoStatus::Error || !self.status.can_advance_to(VideoStatus::Error) {
            return false;
        }
        self.status = VideoStatus::Error;
        self.duration = None;
        self.playback_id = None;
        true
    }

    /// Fold the provider's current view of the asset into this record.
    /// Only forward transitions are taken; returns whether anything changed.
    pub fn merge_provider_asset(&mut self, asset: &ProviderAsset) -> bool {
        match asset.status {
            AssetStatus::Ready => {
                let playback_id = asset
                    .playback_ids
                    .first()
                    .cloned()
                    .or_else(|| self.playback_id.clone());
                self.mark_ready(asset.duration, playback_id)
            }
            AssetStatus::Errored => self.mark_errored(),
            AssetStatus::Preparing | AssetStatus::Unknown => self.mark_processing(),
        }
    }
}
