//! Mux Video REST client
//!
//! Authenticates with an access token id/secret pair (HTTP basic auth). Every
//! Mux response wraps its payload in a `data` object.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    AssetStatus, DirectUpload, DirectUploadRequest, ProviderAsset, ProviderError, ProviderResult,
    VideoProvider,
};
use crate::core::config::MuxConfig;

#[derive(Debug, Deserialize)]
struct MuxEnvelope<T> {
    data: T,
}

#[derive(Debug, Serialize)]
struct CreateUploadBody<'a> {
    new_asset_settings: NewAssetSettings<'a>,
    cors_origin: &'a str,
}

#[derive(Debug, Serialize)]
struct NewAssetSettings<'a> {
    playback_policy: Vec<&'a str>,
    test: bool,
}

#[derive(Debug, Deserialize)]
struct MuxUpload {
    id: String,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MuxPlaybackId {
    id: String,
}

#[derive(Debug, Deserialize)]
struct MuxAsset {
    id: String,
    status: AssetStatus,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    playback_ids: Vec<MuxPlaybackId>,
    #[serde(default)]
    upload_id: Option<String>,
}

impl From<MuxAsset> for ProviderAsset {
    fn from(asset: MuxAsset) -> Self {
        ProviderAsset {
            id: asset.id,
            status: asset.status,
            duration: asset.duration,
            playback_ids: asset.playback_ids.into_iter().map(|p| p.id).collect(),
            upload_id: asset.upload_id,
        }
    }
}

/// Mux Video API client
pub struct MuxClient {
    client: Client,
    base_url: String,
    token_id: String,
    token_secret: String,
}

impl MuxClient {
    pub fn new(config: &MuxConfig) -> ProviderResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("vidhost-core/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ProviderError::Request(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            token_id: config.token_id.clone(),
            token_secret: config.token_secret.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/video/v1{}", self.base_url, path)
    }

    /// Map non-2xx responses to errors, passing successful ones through
    async fn check(response: Response, resource: &str) -> ProviderResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound(resource.to_string()));
        }
        let body = response.text().await.unwrap_or_default();
        Err(ProviderError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> ProviderResult<T> {
        response
            .json::<MuxEnvelope<T>>()
            .await
            .map(|envelope| envelope.data)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }

    fn send_error(e: reqwest::Error) -> ProviderError {
        ProviderError::Request(e.to_string())
    }
}

#[async_trait]
impl VideoProvider for MuxClient {
    async fn create_direct_upload(
        &self,
        request: &DirectUploadRequest,
    ) -> ProviderResult<DirectUpload> {
        let body = CreateUploadBody {
            new_asset_settings: NewAssetSettings {
                playback_policy: vec![request.playback_policy.as_str()],
                test: request.test,
            },
            cors_origin: &request.cors_origin,
        };

        debug!("Creating Mux direct upload (cors_origin={})", request.cors_origin);

        let response = self
            .client
            .post(self.url("/uploads"))
            .basic_auth(&self.token_id, Some(&self.token_secret))
            .json(&body)
            .send()
            .await
            .map_err(Self::send_error)?;
        let upload: MuxUpload = Self::parse(Self::check(response, "upload").await?).await?;

        let url = upload
            .url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| {
                ProviderError::InvalidResponse("Failed to get upload URL from Mux".to_string())
            })?;

        info!("Mux direct upload created: {}", upload.id);
        Ok(DirectUpload { id: upload.id, url })
    }

    async fn get_asset(&self, asset_id: &str) -> ProviderResult<ProviderAsset> {
        let response = self
            .client
            .get(self.url(&format!("/assets/{}", urlencoding::encode(asset_id))))
            .basic_auth(&self.token_id, Some(&self.token_secret))
            .send()
            .await
            .map_err(Self::send_error)?;
        let asset: MuxAsset = Self::parse(Self::check(response, asset_id).await?).await?;
        Ok(asset.into())
    }

    async fn delete_asset(&self, asset_id: &str) -> ProviderResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/assets/{}", urlencoding::encode(asset_id))))
            .basic_auth(&self.token_id, Some(&self.token_secret))
            .send()
            .await
            .map_err(Self::send_error)?;
        Self::check(response, asset_id).await?;
        Ok(())
    }

    async fn cancel_upload(&self, upload_id: &str) -> ProviderResult<()> {
        let response = self
            .client
            .put(self.url(&format!(
                "/uploads/{}/cancel",
                urlencoding::encode(upload_id)
            )))
            .basic_auth(&self.token_id, Some(&self.token_secret))
            .send()
            .await
            .map_err(Self::send_error)?;
        Self::check(response, upload_id).await?;
        Ok(())
    }

    async fn verify_credentials(&self) -> ProviderResult<()> {
        let response = self
            .client
            .get(self.url("/uploads"))
            .query(&[("limit", "1")])
            .basic_auth(&self.token_id, Some(&self.token_secret))
            .send()
            .await
            .map_err(Self::send_error)?;
        Self::check(response, "uploads").await?;
        Ok(())
    }
}
