use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::comments::models::{Comment, CommentAuthor, CommentReply};
use crate::features::videos::dtos::AuthorDto;

/// Request DTO for posting a comment
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCommentDto {
    #[validate(length(min = 1, max = 2000, message = "content must be 1-2000 characters"))]
    #[schema(example = "Great video!")]
    pub content: String,
    #[validate(nested)]
    pub author: AuthorDto,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentReplyDto {
    pub author: AuthorDto,
    pub content: String,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
}

/// Response DTO for a comment
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponseDto {
    pub id: Uuid,
    pub video_id: Uuid,
    pub author: AuthorDto,
    pub content: String,
    pub likes: i64,
    pub replies: Vec<CommentReplyDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CommentAuthor> for AuthorDto {
    fn from(a: CommentAuthor) -> Self {
        Self {
            name: a.name,
            id: a.id,
            avatar: a.avatar,
        }
    }
}

impl From<AuthorDto> for CommentAuthor {
    fn from(a: AuthorDto) -> Self {
        Self {
            name: a.name,
            id: a.id,
            avatar: a.avatar,
        }
    }
}

impl From<CommentReply> for CommentReplyDto {
    fn from(r: CommentReply) -> Self {
        Self {
            author: r.author.into(),
            content: r.content,
            likes: r.likes,
            created_at: r.created_at,
        }
    }
}

impl From<Comment> for CommentResponseDto {
    fn from(c: Comment) -> Self {
        Self {
            id: c.id,
            video_id: c.video_id,
            author: AuthorDto {
                name: c.author_name,
                id: c.author_id,
                avatar: c.author_avatar,
            },
            content: c.content,
            likes: c.likes,
            replies: c.replies.0.into_iter().map(Into::into).collect(),
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
