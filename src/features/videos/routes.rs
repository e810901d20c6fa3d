use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::features::videos::handlers::{self, VideoState, WebhookState};
use crate::features::videos::services::{VideoLifecycleService, VideoService};

/// Create routes for the videos feature
///
/// Note: there is no authentication; webhook deliveries are only checked
/// against the signing secret when one is configured.
pub fn routes(
    videos: Arc<VideoService>,
    lifecycle: Arc<VideoLifecycleService>,
    webhook_secret: Option<Arc<str>>,
) -> Router {
    let video_state = VideoState {
        videos,
        lifecycle: lifecycle.clone(),
    };
    let webhook_state = WebhookState {
        lifecycle,
        webhook_secret,
    };

    let video_routes = Router::new()
        .route("/create-upload", post(handlers::create_upload))
        .route("/videos", get(handlers::list_videos))
        .route(
            "/videos/{id}",
            get(handlers::get_video).delete(handlers::delete_video),
        )
        .route(
            "/videos/{id}/metadata",
            patch(handlers::update_video_metadata),
        )
        .route("/videos/{id}/view", post(handlers::record_view))
        .with_state(video_state);

    let webhook_routes = Router::new()
        .route("/webhooks/{provider}", post(handlers::receive_webhook))
        .with_state(webhook_state);

    video_routes.merge(webhook_routes)
}
