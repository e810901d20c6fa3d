//! Hosted video provider integration
//!
//! The lifecycle service only sees the [`VideoProvider`] trait. [`MuxClient`]
//! talks to the Mux Video REST API in production; tests substitute their own
//! implementation.

mod mux_client;
pub mod signature;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

pub use mux_client::MuxClient;

/// Provider operation errors
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider request failed: {0}")]
    Request(String),

    #[error("Provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Provider resource not found: {0}")]
    NotFound(String),

    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Parameters for a direct (browser to provider) upload session
#[derive(Debug, Clone, PartialEq)]
pub struct DirectUploadRequest {
    /// Origin allowed to PUT the file bytes
    pub cors_origin: String,
    /// Playback policy of the asset created from the upload, e.g. "public"
    pub playback_policy: String,
    /// Create a test asset
    pub test: bool,
}

/// A provider-issued upload session
#[derive(Debug, Clone, PartialEq)]
pub struct DirectUpload {
    pub id: String,
    pub url: String,
}

/// Asset processing state as reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    Preparing,
    Ready,
    Errored,
    #[serde(other)]
    Unknown,
}

/// The provider's view of an asset
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderAsset {
    pub id: String,
    pub status: AssetStatus,
    pub duration: Option<f64>,
    pub playback_ids: Vec<String>,
    pub upload_id: Option<String>,
}

/// Operations the lifecycle service needs from the hosted video provider
#[async_trait]
pub trait VideoProvider: Send + Sync {
    /// Request a direct-upload session
    async fn create_direct_upload(&self, request: &DirectUploadRequest)
        -> ProviderResult<DirectUpload>;

    /// Fetch the current state of an asset
    async fn get_asset(&self, asset_id: &str) -> ProviderResult<ProviderAsset>;

    /// Delete an asset and its renditions
    async fn delete_asset(&self, asset_id: &str) -> ProviderResult<()>;

    /// Cancel an upload session so its URL stops accepting bytes
    async fn cancel_upload(&self, upload_id: &str) -> ProviderResult<()>;

    /// Cheap authenticated call used to check credentials at startup
    async fn verify_credentials(&self) -> ProviderResult<()>;
}
