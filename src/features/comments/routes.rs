use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::comments::handlers;
use crate::features::comments::services::CommentService;

/// Create routes for the comments feature
pub fn routes(service: Arc<CommentService>) -> Router {
    Router::new()
        .route(
            "/videos/{id}/comments",
            get(handlers::list_comments).post(handlers::create_comment),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::comments::repositories::InMemoryCommentRepository;
    use crate::features::videos::models::{fixtures, VideoStatus};
    use crate::features::videos::repositories::InMemoryVideoRepository;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use uuid::Uuid;

    fn server() -> (TestServer, Arc<InMemoryVideoRepository>) {
        let videos = Arc::new(InMemoryVideoRepository::new());
        let comments = Arc::new(InMemoryCommentRepository::new());
        let service = Arc::new(CommentService::new(comments, videos.clone()));
        (TestServer::new(routes(service)).unwrap(), videos)
    }

    #[tokio::test]
    async fn test_post_and_list_comments() {
        let (server, videos) = server();
        let video = fixtures::video(VideoStatus::Ready);
        videos.put(video.clone());
        let path = format!("/videos/{}/comments", video.id);

        let response = server
            .post(&path)
            .json(&json!({ "content": "Nice cut", "author": { "name": "Ana", "id": "u1" } }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["data"]["content"], "Nice cut");
        assert_eq!(body["data"]["videoId"], video.id.to_string());

        let body: Value = server.get(&path).await.json();
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["author"]["name"], "Ana");
    }

    #[tokio::test]
    async fn test_post_comment_errors() {
        let (server, videos) = server();
        let mut video = fixtures::video(VideoStatus::Ready);
        video.allow_comments = false;
        videos.put(video.clone());
        let valid = json!({ "content": "hi", "author": { "name": "Ana", "id": "u1" } });

        let disabled = server
            .post(&format!("/videos/{}/comments", video.id))
            .json(&valid)
            .await;
        assert_eq!(disabled.status_code(), StatusCode::FORBIDDEN);
        let body: Value = disabled.json();
        assert_eq!(body["message"], "Comments are disabled for this video");

        let missing = server
            .post(&format!("/videos/{}/comments", Uuid::now_v7()))
            .json(&valid)
            .await;
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

        let no_author = server
            .post(&format!("/videos/{}/comments", video.id))
            .json(&json!({ "content": "hi" }))
            .await;
        assert_eq!(no_author.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_comments_for_unknown_video() {
        let (server, _) = server();
        let body: Value = server
            .get(&format!("/videos/{}/comments", Uuid::now_v7()))
            .await
            .json();
        assert_eq!(body["data"], json!([]));
    }
}
