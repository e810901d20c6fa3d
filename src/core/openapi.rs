use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::comments::{dtos as comments_dtos, handlers as comments_handlers};
use crate::features::health::{dtos as health_dtos, handlers as health_handlers};
use crate::features::videos::{
    dtos as videos_dtos, handlers as videos_handlers, models as videos_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health_handlers::health_check,
        // Videos
        videos_handlers::create_upload,
        videos_handlers::list_videos,
        videos_handlers::get_video,
        videos_handlers::delete_video,
        videos_handlers::update_video_metadata,
        videos_handlers::record_view,
        // Webhooks
        videos_handlers::receive_webhook,
        // Comments
        comments_handlers::create_comment,
        comments_handlers::list_comments,
    ),
    components(
        schemas(
            // Shared
            Meta,
            health_dtos::HealthResponseDto,
            // Videos
            videos_models::VideoStatus,
            videos_models::VideoVisibility,
            videos_models::ThumbnailKind,
            videos_dtos::AuthorDto,
            videos_dtos::VideoSettingsDto,
            videos_dtos::VideoSettingsPatchDto,
            videos_dtos::ThumbnailDto,
            videos_dtos::VideoMetricsDto,
            videos_dtos::CreateUploadDto,
            videos_dtos::CreateUploadResponseDto,
            videos_dtos::UpdateVideoMetadataDto,
            videos_dtos::VideoResponseDto,
            videos_dtos::DeleteVideoResponseDto,
            ApiResponse<videos_dtos::CreateUploadResponseDto>,
            ApiResponse<Vec<videos_dtos::VideoResponseDto>>,
            ApiResponse<videos_dtos::VideoResponseDto>,
            ApiResponse<videos_dtos::DeleteVideoResponseDto>,
            ApiResponse<videos_dtos::VideoMetricsDto>,
            // Comments
            comments_dtos::CreateCommentDto,
            comments_dtos::CommentReplyDto,
            comments_dtos::CommentResponseDto,
            ApiResponse<comments_dtos::CommentResponseDto>,
            ApiResponse<Vec<comments_dtos::CommentResponseDto>>,
        )
    ),
    tags(
        (name = "health", description = "Liveness"),
        (name = "videos", description = "Video upload, catalogue and lifecycle"),
        (name = "webhooks", description = "Provider event notifications"),
        (name = "comments", description = "Comment threads on videos"),
    ),
    modifiers(&WebhookSignatureAddon),
    info(
        title = "Video Upload Backend API",
        version = "0.1.0",
        description = "API documentation for the video upload backend",
    )
)]
pub struct ApiDoc;

/// Documents the `mux-signature` header checked on webhook deliveries
struct WebhookSignatureAddon;

impl Modify for WebhookSignatureAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "mux_signature",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("mux-signature"))),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
