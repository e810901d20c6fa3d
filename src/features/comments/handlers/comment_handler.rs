use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::comments::dtos::{CommentResponseDto, CreateCommentDto};
use crate::features::comments::services::CommentService;
use crate::shared::types::ApiResponse;

/// Post a comment on a video
#[utoipa::path(
    post,
    path = "/videos/{id}/comments",
    params(
        ("id" = Uuid, Path, description = "Video ID")
    ),
    request_body = CreateCommentDto,
    responses(
        (status = 200, description = "Comment created", body = ApiResponse<CommentResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Comments are disabled for this video"),
        (status = 404, description = "Video not found")
    ),
    tag = "comments"
)]
pub async fn create_comment(
    State(service): State<Arc<CommentService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<CreateCommentDto>,
) -> Result<Json<ApiResponse<CommentResponseDto>>> {
    dto.validate()?;

    let comment = service.add(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(comment), None, None)))
}

/// List comments on a video, newest first
#[utoipa::path(
    get,
    path = "/videos/{id}/comments",
    params(
        ("id" = Uuid, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "List of comments", body = ApiResponse<Vec<CommentResponseDto>>),
    ),
    tag = "comments"
)]
pub async fn list_comments(
    State(service): State<Arc<CommentService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<CommentResponseDto>>>> {
    let comments = service.list(id).await?;
    Ok(Json(ApiResponse::success(Some(comments), None, None)))
}
