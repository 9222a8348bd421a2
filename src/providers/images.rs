// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Profile-picture uploads to a Cloudinary-compatible image host.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{multipart, Client};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::config::ImageProviderConfig;

/// Image received in a multipart request.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Where the provider stored an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Public HTTPS URL
    pub url: String,
    /// Provider identifier, needed to manage or delete the image later
    pub provider_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("image uploads are not configured")]
    NotConfigured,

    #[error("image upload request failed: {0}")]
    Request(String),

    #[error("image provider response was invalid: {0}")]
    InvalidResponse(String),
}

/// Opaque upload function: bytes in, URL and identifier out.
#[async_trait]
pub trait ImageUploader: Send + Sync {
    async fn upload(&self, image: UploadedImage) -> Result<StoredImage, UploadError>;
}

/// Uploader used when no provider credentials are configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledUploader;

#[async_trait]
impl ImageUploader for DisabledUploader {
    async fn upload(&self, _image: UploadedImage) -> Result<StoredImage, UploadError> {
        Err(UploadError::NotConfigured)
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

/// Signed-upload client for the Cloudinary image API.
#[derive(Debug, Clone)]
pub struct CloudinaryClient {
    upload_url: String,
    api_key: String,
    api_secret: String,
    http: Client,
}

impl CloudinaryClient {
    pub fn new(config: &ImageProviderConfig) -> Result<Self, UploadError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| UploadError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            upload_url: format!(
                "{}/v1_1/{}/image/upload",
                config.base_url.trim_end_matches('/'),
                config.cloud_name
            ),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            http,
        })
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }
}

/// SHA-256 request signature over the signed parameters (only `timestamp`).
fn sign_upload(timestamp: i64, api_secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("timestamp={timestamp}{api_secret}").as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait]
impl ImageUploader for CloudinaryClient {
    async fn upload(&self, image: UploadedImage) -> Result<StoredImage, UploadError> {
        let timestamp = Utc::now().timestamp();
        let signature = sign_upload(timestamp, &self.api_secret);
        let size = image.bytes.len();

        let mut part = multipart::Part::bytes(image.bytes).file_name(image.file_name);
        if let Some(content_type) = image.content_type.as_deref() {
            part = part
                .mime_str(content_type)
                .map_err(|e| UploadError::Request(format!("invalid content type: {e}")))?;
        }

        let form = multipart::Form::new()
            .part("file", part)
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        let response = self
            .http
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UploadError::Request(format!("status {status}: {body}")));
        }

        let parsed: UploadResponse = response
            .json()
            .await
            .map_err(|e| UploadError::InvalidResponse(e.to_string()))?;

        info!(public_id = %parsed.public_id, bytes = size, "Uploaded profile picture");

        Ok(StoredImage {
            url: parsed.secure_url,
            provider_id: parsed.public_id,
        })
    }
}

/// Upload `image` if present. Returns the stored URL (empty when there is no
/// image) and the provider id.
pub async fn upload_optional(
    uploader: &dyn ImageUploader,
    image: Option<UploadedImage>,
) -> Result<(String, Option<String>), UploadError> {
    match image {
        Some(image) => {
            let stored = uploader.upload(image).await?;
            Ok((stored.url, Some(stored.provider_id)))
        }
        None => Ok((String::new(), None)),
    }
}
