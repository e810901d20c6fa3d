use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::videos::models::{
    NewVideo, ThumbnailKind, Video, VideoDetailsPatch, VideoMetrics, VideoStatus,
    VideoVisibility,
};
use crate::shared::constants::{
    ANONYMOUS_AUTHOR_ID, ANONYMOUS_AUTHOR_NAME, DEFAULT_VIDEO_CATEGORY, DEFAULT_VIDEO_TITLE,
};

/// Author attribution attached to videos and comments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct AuthorDto {
    #[validate(length(min = 1, max = 100, message = "author.name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "author.id is required"))]
    pub id: String,
    pub avatar: Option<String>,
}

impl AuthorDto {
    pub fn anonymous() -> Self {
        Self {
            name: ANONYMOUS_AUTHOR_NAME.to_string(),
            id: ANONYMOUS_AUTHOR_ID.to_string(),
            avatar: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoSettingsDto {
    pub allow_comments: bool,
    pub allow_ratings: bool,
    pub autoplay: bool,
}

/// Partial settings; omitted fields keep their current value
#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoSettingsPatchDto {
    pub allow_comments: Option<bool>,
    pub allow_ratings: Option<bool>,
    pub autoplay: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ThumbnailDto {
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub kind: ThumbnailKind,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct VideoMetricsDto {
    pub views: i64,
    pub likes: i64,
    pub shares: i64,
}

impl From<VideoMetrics> for VideoMetricsDto {
    fn from(m: VideoMetrics) -> Self {
        Self {
            views: m.views,
            likes: m.likes,
            shares: m.shares,
        }
    }
}

/// Request DTO for creating a direct upload
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct CreateUploadDto {
    /// Defaults to "Untitled Video"
    #[validate(length(max = 200, message = "title must be at most 200 characters"))]
    #[schema(example = "Demo")]
    pub title: Option<String>,
    #[validate(length(max = 5000, message = "description must be at most 5000 characters"))]
    pub description: Option<String>,
    #[validate(length(max = 100, message = "category must be at most 100 characters"))]
    pub category: Option<String>,
    #[validate(length(max = 30, message = "at most 30 tags are allowed"))]
    pub tags: Option<Vec<String>>,
    pub visibility: Option<VideoVisibility>,
    #[validate(nested)]
    pub author: Option<AuthorDto>,
    pub settings: Option<VideoSettingsPatchDto>,
}

impl From<CreateUploadDto> for NewVideo {
    fn from(dto: CreateUploadDto) -> Self {
        let author = dto.author.unwrap_or_else(AuthorDto::anonymous);
        let settings = dto.settings.unwrap_or_default();

        NewVideo {
            title: dto
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_VIDEO_TITLE.to_string()),
            description: dto.description.unwrap_or_default(),
            category: dto
                .category
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_VIDEO_CATEGORY.to_string()),
            tags: dto.tags.unwrap_or_default(),
            visibility: dto.visibility.unwrap_or_default(),
            author_name: author.name,
            author_id: author.id,
            author_avatar: author.avatar,
            allow_comments: settings.allow_comments.unwrap_or(true),
            allow_ratings: settings.allow_ratings.unwrap_or(true),
            autoplay: settings.autoplay.unwrap_or(true),
        }
    }
}

/// Response DTO for a created upload session
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUploadResponseDto {
    pub video_id: Uuid,
    pub title: String,
    pub status: VideoStatus,
    /// Direct-upload URL; the client PUTs the file bytes here
    pub upload_url: String,
    pub upload_id: String,
}

/// Whitelisted metadata update. Fields not listed here are ignored.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateVideoMetadataDto {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 5000, message = "description must be at most 5000 characters"))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100, message = "category must be 1-100 characters"))]
    pub category: Option<String>,
    #[validate(length(max = 30, message = "at most 30 tags are allowed"))]
    pub tags: Option<Vec<String>>,
    pub visibility: Option<VideoVisibility>,
    pub settings: Option<VideoSettingsPatchDto>,
}

impl From<UpdateVideoMetadataDto> for VideoDetailsPatch {
    fn from(dto: UpdateVideoMetadataDto) -> Self {
        let settings = dto.settings.unwrap_or_default();

        VideoDetailsPatch {
            title: dto.title,
            description: dto.description,
            category: dto.category,
            tags: dto.tags,
            visibility: dto.visibility,
            allow_comments: settings.allow_comments,
            allow_ratings: settings.allow_ratings,
            autoplay: settings.autoplay,
        }
    }
}

/// Full video representation returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoResponseDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub visibility: VideoVisibility,
    pub author: AuthorDto,
    pub settings: VideoSettingsDto,
    pub thumbnail: ThumbnailDto,
    /// Engagement counters
    pub metadata: VideoMetricsDto,
    pub status: VideoStatus,
    pub provider_upload_id: Option<String>,
    pub provider_asset_id: Option<String>,
    /// Set once the asset is ready for streaming
    pub playback_id: Option<String>,
    /// Duration in seconds, set once the asset is ready
    pub duration: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Video> for VideoResponseDto {
    fn from(v: Video) -> Self {
        let metadata = v.metrics().into();
        Self {
            id: v.id,
            title: v.title,
            description: v.description,
            category: v.category,
            tags: v.tags,
            visibility: v.visibility,
            author: AuthorDto {
                name: v.author_name,
                id: v.author_id,
                avatar: v.author_avatar,
            },
            settings: VideoSettingsDto {
                allow_comments: v.allow_comments,
                allow_ratings: v.allow_ratings,
                autoplay: v.autoplay,
            },
            thumbnail: ThumbnailDto {
                url: v.thumbnail_url,
                kind: v.thumbnail_kind,
            },
            metadata,
            status: v.status,
            provider_upload_id: v.provider_upload_id,
            provider_asset_id: v.provider_asset_id,
            playback_id: v.playback_id,
            duration: v.duration,
            created_at: v.created_at,
            updated_at: v.updated_at,
        }
    }
}

/// Response DTO for delete operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteVideoResponseDto {
    pub deleted: bool,
}
