use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};

use crate::core::error::{AppError, Result};
use crate::features::videos::events::ProviderEvent;
use crate::features::videos::services::{EventOutcome, VideoLifecycleService};
use crate::modules::video_provider::signature::{self, DEFAULT_TOLERANCE_SECS, SIGNATURE_HEADER};

pub const MUX_PROVIDER: &str = "mux";

#[derive(Clone)]
pub struct WebhookState {
    pub lifecycle: Arc<VideoLifecycleService>,
    /// Signing secret; deliveries are not verified when unset
    pub webhook_secret: Option<Arc<str>>,
}

/// Receive a provider webhook
///
/// Acknowledges with a plaintext body. Unmatched `video.asset.created` and
/// `video.asset.ready` events answer 404; everything else that parses answers 200.
#[utoipa::path(
    post,
    path = "/webhooks/{provider}",
    params(
        ("provider" = String, Path, description = "Provider name, only `mux` is served")
    ),
    request_body(content = String, description = "Raw provider event JSON", content_type = "application/json"),
    responses(
        (status = 200, description = "Event processed", body = String, content_type = "text/plain"),
        (status = 400, description = "Malformed payload"),
        (status = 401, description = "Signature verification failed"),
        (status = 404, description = "Unknown provider or no matching video", body = String, content_type = "text/plain")
    ),
    security((), ("mux_signature" = [])),
    tag = "webhooks"
)]
pub async fn receive_webhook(
    State(state): State<WebhookState>,
    Path(provider): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, &'static str)> {
    if provider != MUX_PROVIDER {
        return Err(AppError::NotFound(format!(
            "Unknown webhook provider: {}",
            provider
        )));
    }

    if let Some(secret) = state.webhook_secret.as_deref() {
        let header = headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok());
        signature::verify(
            secret,
            header,
            &body,
            chrono::Utc::now().timestamp(),
            DEFAULT_TOLERANCE_SECS,
        )
        .map_err(|e| {
            tracing::warn!("Rejected webhook delivery: {}", e);
            AppError::Unauthorized(e.to_string())
        })?;
    }

    let event = ProviderEvent::parse(&body).map_err(|e| {
        tracing::error!("Webhook processing failed: {}", e);
        AppError::BadRequest(e.to_string())
    })?;
    tracing::info!("Received webhook event: {}", event.kind());

    match state.lifecycle.handle_provider_event(event).await? {
        EventOutcome::Unmatched => Ok((StatusCode::NOT_FOUND, "Video not found")),
        EventOutcome::Updated(_)
        | EventOutcome::Unchanged(_)
        | EventOutcome::Dropped
        | EventOutcome::Ignored => Ok((StatusCode::OK, "Webhook processed successfully")),
    }
}
