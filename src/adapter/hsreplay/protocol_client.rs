//! Two-Phase Upload Protocol
//!
//! Phase 1 posts the metadata and receives a staging URL and short id.
//! Phase 2 pushes the gzipped log to the staging URL.
//!
//! The upload counts as successful once phase 1 returns a usable short id.
//! A phase 2 failure is reported as a payload warning on the staged upload.

use async_trait::async_trait;
use log::{error, info};
use std::future::Future;
use std::sync::Arc;

use super::client::ReplayTransport;
use super::compression::{gzip, CONTENT_ENCODING};
use super::models::UploadRequestResponse;
use crate::application::dto::upload_config::UploadConfig;
use crate::domain::entities::upload_metadata::UploadMetadata;
use crate::domain::entities::upload_result::UploadError;
use crate::domain::repositories::upload_repository::{StagedUpload, UploadRepository};

pub const API_KEY_HEADER: &str = "X-Api-Key";
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Replay service protocol client
pub struct UploadProtocolClient {
    transport: Arc<dyn ReplayTransport>,
    config: UploadConfig,
}

impl UploadProtocolClient {
    pub fn new(transport: Arc<dyn ReplayTransport>, config: UploadConfig) -> Self {
        Self { transport, config }
    }

    /// Headers for the authenticated phase 1 request
    pub fn auth_headers(&self, token: &str) -> Vec<(String, String)> {
        vec![
            (API_KEY_HEADER.to_string(), self.config.api_key.clone()),
            (AUTHORIZATION_HEADER.to_string(), format!("Token {}", token)),
        ]
    }

    /// Headers for the phase 2 payload push
    pub fn payload_headers() -> Vec<(String, String)> {
        vec![
            ("Content-Type".to_string(), "text/plain".to_string()),
            ("Content-Encoding".to_string(), CONTENT_ENCODING.to_string()),
        ]
    }

    /// Run one network phase under the configured timeout
    async fn bounded<T, F>(&self, phase: &str, fut: F) -> Result<T, UploadError>
    where
        F: Future<Output = anyhow::Result<T>>,
    {
        match tokio::time::timeout(self.config.phase_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(UploadError::ProtocolFailure(format!("{}: {:#}", phase, e))),
            Err(_) => Err(UploadError::ProtocolFailure(format!(
                "{}: timed out after {:?}",
                phase, self.config.phase_timeout
            ))),
        }
    }

    /// Phase 1: exchange metadata for a staging location
    pub async fn request_staging(
        &self,
        metadata: &UploadMetadata,
        token: &str,
    ) -> Result<StagedUpload, UploadError> {
        let body = serde_json::to_value(metadata).map_err(|e| {
            UploadError::ProtocolFailure(format!("Failed to serialize metadata: {}", e))
        })?;
        let headers = self.auth_headers(token);

        let response = self
            .bounded(
                "upload request",
                self.transport
                    .post_json(&self.config.upload_url, &headers, &body),
            )
            .await?;

        UploadRequestResponse::from_value(response)?.into_staged()
    }

    /// Phase 2: push the compressed log to the staging URL
    pub async fn push_payload(&self, put_url: &str, log: &str) -> Result<(), UploadError> {
        let payload = gzip(log)?;
        let headers = Self::payload_headers();

        info!("Pushing {} compressed bytes to staging URL", payload.len());
        self.bounded(
            "payload upload",
            self.transport.put_bytes(put_url, &headers, payload),
        )
        .await
    }
}

#[async_trait]
impl UploadRepository for UploadProtocolClient {
    async fn upload(
        &self,
        metadata: &UploadMetadata,
        log: &str,
        token: &str,
    ) -> Result<StagedUpload, UploadError> {
        let mut staged = self.request_staging(metadata, token).await?;

        if let Err(e) = self.push_payload(&staged.put_url, log).await {
            error!("Payload upload for {} failed: {}", staged.short_id, e);
            staged.payload_warning = Some(e.to_string());
        }

        Ok(staged)
    }
}
