use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

/// Author attribution as stored inside reply documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentAuthor {
    pub name: String,
    pub id: String,
    pub avatar: Option<String>,
}

/// A reply nested in its parent comment's `replies` column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentReply {
    pub author: CommentAuthor,
    pub content: String,
    #[serde(default)]
    pub likes: i64,
    pub created_at: DateTime<Utc>,
}

/// Database model for a comment
#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub video_id: Uuid,
    pub author_name: String,
    pub author_id: String,
    pub author_avatar: Option<String>,
    pub content: String,
    pub likes: i64,
    pub replies: Json<Vec<CommentReply>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub video_id: Uuid,
    pub author: CommentAuthor,
    pub content: String,
}
