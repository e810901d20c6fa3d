use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use std::sync::Mutex;
use uuid::Uuid;

use super::CommentRepository;
use crate::core::error::Result;
use crate::features::comments::models::{Comment, NewComment};

#[derive(Default)]
pub struct InMemoryCommentRepository {
    comments: Mutex<Vec<Comment>>,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.comments.lock().unwrap().len()
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn insert(&self, new_comment: NewComment) -> Result<Comment> {
        let now = Utc::now();
        let comment = Comment {
            id: Uuid::now_v7(),
            video_id: new_comment.video_id,
            author_name: new_comment.author.name,
            author_id: new_comment.author.id,
            author_avatar: new_comment.author.avatar,
            content: new_comment.content,
            likes: 0,
            replies: Json(Vec::new()),
            created_at: now,
            updated_at: now,
        };
        self.comments.lock().unwrap().push(comment.clone());
        Ok(comment)
    }

    async fn list_for_video(&self, video_id: Uuid) -> Result<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.video_id == video_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(comments)
    }
}
