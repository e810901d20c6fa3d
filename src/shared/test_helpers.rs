//! Test doubles shared across feature tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::modules::video_provider::{
    DirectUpload, DirectUploadRequest, ProviderAsset, ProviderError, ProviderResult,
    VideoProvider,
};

#[derive(Default)]
struct FakeProviderState {
    uploads_created: u32,
    upload_requests: Vec<DirectUploadRequest>,
    fail_uploads: bool,
    omit_upload_url: bool,
    unreachable: bool,
    fail_deletes: bool,
    assets: HashMap<String, ProviderAsset>,
    deleted_assets: Vec<String>,
    cancelled_uploads: Vec<String>,
}

/// Scriptable in-process stand-in for the hosted video provider
#[derive(Default)]
pub struct FakeProvider {
    state: Mutex<FakeProviderState>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload session creation fails with a transport error
    pub fn fail_uploads(&self) {
        self.state.lock().unwrap().fail_uploads = true;
    }

    /// Upload session creation answers without a usable URL
    pub fn omit_upload_url(&self) {
        self.state.lock().unwrap().omit_upload_url = true;
    }

    /// Every asset read fails as if the network were down
    pub fn go_offline(&self) {
        self.state.lock().unwrap().unreachable = true;
    }

    /// Asset deletion and upload cancellation fail
    pub fn fail_deletes(&self) {
        self.state.lock().unwrap().fail_deletes = true;
    }

    pub fn put_asset(&self, asset: ProviderAsset) {
        self.state
            .lock()
            .unwrap()
            .assets
            .insert(asset.id.clone(), asset);
    }

    pub fn upload_requests(&self) -> Vec<DirectUploadRequest> {
        self.state.lock().unwrap().upload_requests.clone()
    }

    pub fn deleted_assets(&self) -> Vec<String> {
        self.state.lock().unwrap().deleted_assets.clone()
    }

    pub fn cancelled_uploads(&self) -> Vec<String> {
        self.state.lock().unwrap().cancelled_uploads.clone()
    }
}

#[async_trait]
impl VideoProvider for FakeProvider {
    async fn create_direct_upload(
        &self,
        request: &DirectUploadRequest,
    ) -> ProviderResult<DirectUpload> {
        let mut state = self.state.lock().unwrap();
        state.upload_requests.push(request.clone());
        if state.fail_uploads {
            return Err(ProviderError::Request("connection refused".to_string()));
        }
        if state.omit_upload_url {
            return Err(ProviderError::InvalidResponse(
                "Failed to get upload URL from Mux".to_string(),
            ));
        }
        state.uploads_created += 1;
        let id = format!("up_{}", state.uploads_created);
        Ok(DirectUpload {
            url: format!("https://storage.example/upload/{}", id),
            id,
        })
    }

    async fn get_asset(&self, asset_id: &str) -> ProviderResult<ProviderAsset> {
        let state = self.state.lock().unwrap();
        if state.unreachable {
            return Err(ProviderError::Request("network unreachable".to_string()));
        }
        state
            .assets
            .get(asset_id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(asset_id.to_string()))
    }

    async fn delete_asset(&self, asset_id: &str) -> ProviderResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_deletes {
            return Err(ProviderError::Status {
                status: 500,
                body: "internal error".to_string(),
            });
        }
        state.assets.remove(asset_id);
        state.deleted_assets.push(asset_id.to_string());
        Ok(())
    }

    async fn cancel_upload(&self, upload_id: &str) -> ProviderResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_deletes {
            return Err(ProviderError::Request("connection reset".to_string()));
        }
        state.cancelled_uploads.push(upload_id.to_string());
        Ok(())
    }

    async fn verify_credentials(&self) -> ProviderResult<()> {
        Ok(())
    }
}
