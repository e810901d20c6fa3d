use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::videos::events::ProviderEvent;
use crate::features::videos::models::{NewVideo, Video};
use crate::features::videos::repositories::VideoRepository;
use crate::modules::video_provider::{DirectUploadRequest, VideoProvider};
use crate::shared::constants::DEFAULT_PLAYBACK_POLICY;

/// Settings applied to every direct-upload session
#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub cors_origin: String,
    pub test_assets: bool,
}

/// Result of a successful `initiate`
#[derive(Debug, Clone)]
pub struct InitiatedUpload {
    pub video: Video,
    pub upload_id: String,
    pub upload_url: String,
}

/// What a webhook event did to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// The matched record was written
    Updated(Uuid),
    /// A record matched but the event changed nothing (redelivery or out-of-order)
    Unchanged(Uuid),
    /// No record matched an event that should have one
    Unmatched,
    /// No record matched and the event is safe to drop
    Dropped,
    /// Event type not handled by this service
    Ignored,
}

/// Owns the video status field.
///
/// Client actions (initiate, retire) and provider notifications (webhook
/// events, read-time refreshes) all go through here so the local record
/// converges on the provider's view of the asset.
pub struct VideoLifecycleService {
    videos: Arc<dyn VideoRepository>,
    provider: Arc<dyn VideoProvider>,
    upload_settings: UploadSettings,
}

impl VideoLifecycleService {
    pub fn new(
        videos: Arc<dyn VideoRepository>,
        provider: Arc<dyn VideoProvider>,
        upload_settings: UploadSettings,
    ) -> Self {
        Self {
            videos,
            provider,
            upload_settings,
        }
    }

    /// Persist a pending record and open a direct-upload session for it.
    ///
    /// If the session cannot be opened the record is deleted again and the
    /// provider's error is returned.
    pub async fn initiate(&self, new_video: NewVideo) -> Result<InitiatedUpload> {
        let video = self.videos.insert(new_video).await?;
        let video_id = video.id;
        info!("Video saved to database: id={}, title={}", video.id, video.title);

        match self.open_upload_session(video).await {
            Ok(initiated) => Ok(initiated),
            Err(e) => {
                error!("Create upload failed for video {}: {}", video_id, e);
                match self.videos.delete(video_id).await {
                    Ok(_) => info!("Rolled back pending video {}", video_id),
                    Err(delete_err) => error!(
                        "Failed to roll back pending video {}: {}",
                        video_id, delete_err
                    ),
                }
                Err(e)
            }
        }
    }

    async fn open_upload_session(&self, mut video: Video) -> Result<InitiatedUpload> {
        let request = DirectUploadRequest {
            cors_origin: self.upload_settings.cors_origin.clone(),
            playback_policy: DEFAULT_PLAYBACK_POLICY.to_string(),
            test: self.upload_settings.test_assets,
        };
        let upload = self.provider.create_direct_upload(&request).await?;
        if upload.url.is_empty() {
            return Err(AppError::ExternalServiceError(
                "Failed to get upload URL from provider".to_string(),
            ));
        }

        video.provider_upload_id = Some(upload.id.clone());
        let video = self.videos.update_lifecycle(&video).await?;

        Ok(InitiatedUpload {
            video,
            upload_id: upload.id,
            upload_url: upload.url,
        })
    }

    /// Apply a provider notification to the matching record
    pub async fn handle_provider_event(&self, event: ProviderEvent) -> Result<EventOutcome> {
        match event {
            ProviderEvent::AssetCreated {
                asset_id,
                upload_id,
            } => {
                debug!(
                    "Processing asset creation: asset_id={}, upload_id={:?}",
                    asset_id, upload_id
                );
                let found = match upload_id.as_deref() {
                    Some(upload_id) => self.videos.find_by_upload_id(upload_id).await?,
                    None => None,
                };
                let Some(mut video) = found else {
                    warn!("No video found for upload ID: {:?}", upload_id);
                    return Ok(EventOutcome::Unmatched);
                };

                let attached = video.attach_asset(&asset_id);
                let advanced = video.mark_processing();
                if advanced {
                    info!("Video {} asset created and processing", video.id);
                }
                self.store_if_changed(video, attached || advanced).await
            }

            ProviderEvent::AssetReady {
                asset_id,
                upload_id,
                duration,
                playback_ids,
            } => {
                debug!(
                    "Processing asset ready: asset_id={}, upload_id={:?}",
                    asset_id, upload_id
                );
                let Some(mut video) = self.resolve(&asset_id, upload_id.as_deref()).await? else {
                    warn!(
                        "No video found for asset ID: {} or upload ID: {:?}",
                        asset_id, upload_id
                    );
                    return Ok(EventOutcome::Unmatched);
                };

                let attached = video.attach_asset(&asset_id);
                let became_ready = video.mark_ready(duration, playback_ids.into_iter().next());
                if became_ready {
                    info!("Video {} is ready for streaming", video.id);
                } else if video.status.is_terminal() {
                    debug!(
                        "Video {} already {}, ready event changes nothing",
                        video.id, video.status
                    );
                }
                self.store_if_changed(video, attached || became_ready).await
            }

            ProviderEvent::AssetErrored {
                asset_id,
                upload_id,
                errors,
            } => {
                debug!(
                    "Processing asset error: asset_id={}, upload_id={:?}",
                    asset_id, upload_id
                );
                let Some(mut video) = self.resolve(&asset_id, upload_id.as_deref()).await? else {
                    debug!("Dropping error event for unknown asset {}", asset_id);
                    return Ok(EventOutcome::Dropped);
                };

                let attached = video.attach_asset(&asset_id);
                let errored = video.mark_errored();
                if errored {
                    error!(
                        "Video {} processing failed: {}",
                        video.id,
                        errors.map(|e| e.to_string()).unwrap_or_default()
                    );
                }
                self.store_if_changed(video, attached || errored).await
            }

            ProviderEvent::Unrecognized { kind } => {
                debug!("Ignoring webhook event type {}", kind);
                Ok(EventOutcome::Ignored)
            }
        }
    }

    /// Find the record for an asset: by asset id first, then by upload session.
    /// The fallback covers a ready/errored event that arrives before the
    /// created event has been recorded.
    async fn resolve(&self, asset_id: &str, upload_id: Option<&str>) -> Result<Option<Video>> {
        if let Some(video) = self.videos.find_by_asset_id(asset_id).await? {
            return Ok(Some(video));
        }
        match upload_id {
            Some(upload_id) => self.videos.find_by_upload_id(upload_id).await,
            None => Ok(None),
        }
    }

    async fn store_if_changed(&self, video: Video, changed: bool) -> Result<EventOutcome> {
        if !changed {
            return Ok(EventOutcome::Unchanged(video.id));
        }
        let saved = self.videos.update_lifecycle(&video).await?;
        Ok(EventOutcome::Updated(saved.id))
    }

    /// Refresh a record from the provider on read.
    ///
    /// Covers missed or delayed webhooks. Any failure along the way leaves the
    /// stored record as the answer.
    pub async fn reconcile_on_read(&self, video: Video) -> Video {
        let Some(asset_id) = video.provider_asset_id.clone() else {
            return video;
        };

        let asset = match self.provider.get_asset(&asset_id).await {
            Ok(asset) => asset,
            Err(e) => {
                warn!("Could not fetch asset details for {}: {}", asset_id, e);
                return video;
            }
        };

        let mut merged = video.clone();
        if !merged.merge_provider_asset(&asset) {
            return video;
        }

        match self.videos.update_lifecycle(&merged).await {
            Ok(saved) => {
                info!(
                    "Reconciled video {} from provider: status={}, duration={:?}",
                    saved.id, saved.status, saved.duration
                );
                saved
            }
            Err(e) => {
                warn!("Failed to persist reconciled video {}: {}", video.id, e);
                video
            }
        }
    }

    /// Delete a video. Provider-side cleanup is best effort; the local record
    /// is always removed.
    pub async fn retire(&self, id: Uuid) -> Result<()> {
        let video = self
            .videos
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

        let delete_asset = async {
            if let Some(asset_id) = video.provider_asset_id.as_deref() {
                match self.provider.delete_asset(asset_id).await {
                    Ok(()) => info!("Deleted asset from provider: {}", asset_id),
                    Err(e) => error!("Failed to delete asset {} from provider: {}", asset_id, e),
                }
            }
        };
        let cancel_upload = async {
            if let Some(upload_id) = video.provider_upload_id.as_deref() {
                match self.provider.cancel_upload(upload_id).await {
                    Ok(()) => info!("Cancelled upload on provider: {}", upload_id),
                    Err(e) => error!("Failed to cancel upload {} on provider: {}", upload_id, e),
                }
            }
        };
        futures::join!(delete_asset, cancel_upload);

        self.videos.delete(id).await?;
        info!("Deleted video from database: {}", id);
        Ok(())
    }
}
