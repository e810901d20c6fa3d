use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::videos::dtos::{
    CreateUploadDto, CreateUploadResponseDto, DeleteVideoResponseDto, UpdateVideoMetadataDto,
    VideoMetricsDto, VideoResponseDto,
};
use crate::features::videos::services::{VideoLifecycleService, VideoService};
use crate::shared::types::{ApiResponse, Meta};

/// Services shared by the video endpoints
#[derive(Clone)]
pub struct VideoState {
    pub videos: Arc<VideoService>,
    pub lifecycle: Arc<VideoLifecycleService>,
}

/// Create a direct upload
///
/// Persists a pending video record and returns a provider upload URL. The
/// client sends the file bytes straight to that URL; processing progress
/// arrives later through webhooks.
#[utoipa::path(
    post,
    path = "/create-upload",
    request_body = CreateUploadDto,
    responses(
        (status = 200, description = "Upload URL created", body = ApiResponse<CreateUploadResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Provider or database error")
    ),
    tag = "videos"
)]
pub async fn create_upload(
    State(state): State<VideoState>,
    AppJson(dto): AppJson<CreateUploadDto>,
) -> Result<Json<ApiResponse<CreateUploadResponseDto>>> {
    dto.validate()?;

    let initiated = state.lifecycle.initiate(dto.into()).await?;
    let response = CreateUploadResponseDto {
        video_id: initiated.video.id,
        title: initiated.video.title,
        status: initiated.video.status,
        upload_url: initiated.upload_url,
        upload_id: initiated.upload_id,
    };

    Ok(Json(ApiResponse::success(
        Some(response),
        Some("Upload URL created successfully".to_string()),
        None,
    )))
}

/// List all videos, newest first
#[utoipa::path(
    get,
    path = "/videos",
    responses(
        (status = 200, description = "List of videos", body = ApiResponse<Vec<VideoResponseDto>>),
    ),
    tag = "videos"
)]
pub async fn list_videos(
    State(state): State<VideoState>,
) -> Result<Json<ApiResponse<Vec<VideoResponseDto>>>> {
    let videos: Vec<VideoResponseDto> = state
        .videos
        .list()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = videos.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(videos),
        None,
        Some(Meta { total }),
    )))
}

/// Get video by ID
///
/// The stored record is refreshed from the provider first when it already
/// references an asset.
#[utoipa::path(
    get,
    path = "/videos/{id}",
    params(
        ("id" = Uuid, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Video found", body = ApiResponse<VideoResponseDto>),
        (status = 404, description = "Video not found")
    ),
    tag = "videos"
)]
pub async fn get_video(
    State(state): State<VideoState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<VideoResponseDto>>> {
    let video = state.videos.get(id).await?;
    let video = state.lifecycle.reconcile_on_read(video).await;
    Ok(Json(ApiResponse::success(Some(video.into()), None, None)))
}

/// Delete video
///
/// Removes the provider asset and upload session when possible, then always
/// removes the local record.
#[utoipa::path(
    delete,
    path = "/videos/{id}",
    params(
        ("id" = Uuid, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Video deleted", body = ApiResponse<DeleteVideoResponseDto>),
        (status = 404, description = "Video not found")
    ),
    tag = "videos"
)]
pub async fn delete_video(
    State(state): State<VideoState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeleteVideoResponseDto>>> {
    state.lifecycle.retire(id).await?;
    Ok(Json(ApiResponse::success(
        Some(DeleteVideoResponseDto { deleted: true }),
        Some("Video deleted successfully".to_string()),
        None,
    )))
}

/// Update video metadata
///
/// Only title, description, category, tags, visibility and settings are
/// applied. Other fields in the body are ignored.
#[utoipa::path(
    patch,
    path = "/videos/{id}/metadata",
    params(
        ("id" = Uuid, Path, description = "Video ID")
    ),
    request_body = UpdateVideoMetadataDto,
    responses(
        (status = 200, description = "Video updated", body = ApiResponse<VideoResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Video not found")
    ),
    tag = "videos"
)]
pub async fn update_video_metadata(
    State(state): State<VideoState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateVideoMetadataDto>,
) -> Result<Json<ApiResponse<VideoResponseDto>>> {
    dto.validate()?;

    let video = state.videos.update_metadata(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(video.into()), None, None)))
}

/// Record a view
#[utoipa::path(
    post,
    path = "/videos/{id}/view",
    params(
        ("id" = Uuid, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Updated engagement counters", body = ApiResponse<VideoMetricsDto>),
        (status = 404, description = "Video not found")
    ),
    tag = "videos"
)]
pub async fn record_view(
    State(state): State<VideoState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<VideoMetricsDto>>> {
    let metrics = state.videos.record_view(id).await?;
    Ok(Json(ApiResponse::success(Some(metrics), None, None)))
}
