use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::comments::dtos::{CommentResponseDto, CreateCommentDto};
use crate::features::comments::models::NewComment;
use crate::features::comments::repositories::CommentRepository;
use crate::features::videos::repositories::VideoRepository;

/// Service for comment threads on videos
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    videos: Arc<dyn VideoRepository>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentRepository>, videos: Arc<dyn VideoRepository>) -> Self {
        Self { comments, videos }
    }

    /// Post a comment on a video that accepts comments
    pub async fn add(&self, video_id: Uuid, dto: CreateCommentDto) -> Result<CommentResponseDto> {
        let content = dto.content.trim();
        if content.is_empty() {
            return Err(AppError::Validation("content is required".to_string()));
        }

        let video = self
            .videos
            .find_by_id(video_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;
        if !video.allow_comments {
            return Err(AppError::Forbidden(
                "Comments are disabled for this video".to_string(),
            ));
        }

        let comment = self
            .comments
            .insert(NewComment {
                video_id,
                author: dto.author.into(),
                content: content.to_string(),
            })
            .await?;
        tracing::debug!("Comment {} added to video {}", comment.id, video_id);

        Ok(comment.into())
    }

    /// Comments on a video, newest first. Unknown videos have no comments.
    pub async fn list(&self, video_id: Uuid) -> Result<Vec<CommentResponseDto>> {
        let comments = self.comments.list_for_video(video_id).await?;
        Ok(comments.into_iter().map(Into::into).collect())
    }
}
