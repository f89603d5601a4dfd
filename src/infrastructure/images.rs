use crate::domain::images::{ImageStore, ImageUpload, UploadedImage};
use crate::infrastructure::config::CloudinaryConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use time::OffsetDateTime;

const CLOUDINARY_API: &str = "https://api.cloudinary.com/v1_1";

pub fn from_config(config: Option<&CloudinaryConfig>, http: reqwest::Client) -> Arc<dyn ImageStore> {
    match config {
        Some(config) => Arc::new(CloudinaryImageStore::new(http, config.clone())),
        None => Arc::new(DisabledImageStore),
    }
}

/// Used when no image provider credentials are configured.
#[derive(Debug, Clone, Default)]
pub struct DisabledImageStore;

#[async_trait]
impl ImageStore for DisabledImageStore {
    async fn upload(&self, _image: ImageUpload) -> Result<UploadedImage> {
        Err(anyhow::anyhow!("image storage is not configured"))
    }

    async fn delete(&self, _public_id: &str) -> Result<()> {
        Err(anyhow::anyhow!("image storage is not configured"))
    }
}

#[derive(Debug, Deserialize)]
struct CloudinaryUploadResponse {
    public_id: String,
    url: String,
    secure_url: String,
    format: String,
    bytes: u64,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
struct CloudinaryErrorBody {
    error: CloudinaryErrorMessage,
}

#[derive(Debug, Deserialize)]
struct CloudinaryErrorMessage {
    message: String,
}

/// Signed uploads against the Cloudinary REST API.
pub struct CloudinaryImageStore {
    http: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryImageStore {
    pub fn new(http: reqwest::Client, config: CloudinaryConfig) -> Self {
        Self { http, config }
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/{}/image/{}", CLOUDINARY_API, self.config.cloud_name, action)
    }

    async fn error_message(response: reqwest::Response) -> String {
        let status = response.status();
        match response.json::<CloudinaryErrorBody>().await {
            Ok(body) => body.error.message,
            Err(_) => format!("image provider returned {}", status),
        }
    }
}

/// Cloudinary signature: parameters sorted by name, joined as a query string,
/// with the API secret appended, then SHA-256 hex.
pub fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(api_secret.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[async_trait]
impl ImageStore for CloudinaryImageStore {
    #[tracing::instrument(skip(self, image), fields(file_name = %image.file_name, size = image.bytes.len()))]
    async fn upload(&self, image: ImageUpload) -> Result<UploadedImage> {
        let timestamp = OffsetDateTime::now_utc().unix_timestamp().to_string();
        let signature = sign_params(&[("timestamp", timestamp.as_str())], &self.config.api_secret);

        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)
            .context("Invalid image content type")?;
        let form = Form::new()
            .part("file", part)
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        let response = self
            .http
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .context("Failed to reach image provider")?;

        if !response.status().is_success() {
            let message = Self::error_message(response).await;
            tracing::error!(%message, "image upload rejected");
            anyhow::bail!("Image upload failed: {}", message);
        }

        let body: CloudinaryUploadResponse = response
            .json()
            .await
            .context("Unexpected image provider response")?;

        Ok(UploadedImage {
            public_id: body.public_id,
            url: body.url,
            secure_url: body.secure_url,
            format: body.format,
            bytes: body.bytes,
            created_at: body.created_at,
        })
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, public_id: &str) -> Result<()> {
        let timestamp = OffsetDateTime::now_utc().unix_timestamp().to_string();
        let signature = sign_params(
            &[("public_id", public_id), ("timestamp", timestamp.as_str())],
            &self.config.api_secret,
        );

        let form = [
            ("public_id", public_id.to_string()),
            ("api_key", self.config.api_key.clone()),
            ("timestamp", timestamp),
            ("signature", signature),
            ("signature_algorithm", "sha256".to_string()),
        ];

        let response = self
            .http
            .post(self.endpoint("destroy"))
            .form(&form)
            .send()
            .await
            .context("Failed to reach image provider")?;

        if !response.status().is_success() {
            let message = Self::error_message(response).await;
            anyhow::bail!("Image delete failed: {}", message);
        }

        Ok(())
    }
}
