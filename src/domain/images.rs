use async_trait::async_trait;
use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
}

#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub public_id: String,
    pub url: String,
    pub secure_url: String,
    pub format: String,
    /// Stored size in bytes
    pub bytes: u64,
    pub created_at: OffsetDateTime,
}

/// Public view of an upload, in kilobytes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInfo {
    pub image_id: String,
    pub size: f64,
    pub format: String,
    pub image_url: String,
    pub image_secure_url: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<UploadedImage> for ImageInfo {
    fn from(image: UploadedImage) -> Self {
        Self {
            image_id: image.public_id,
            size: image.bytes as f64 / 1024.0,
            format: image.format,
            image_url: image.url,
            image_secure_url: image.secure_url,
            created_at: image.created_at,
        }
    }
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn upload(&self, image: ImageUpload) -> Result<UploadedImage, anyhow::Error>;
    async fn delete(&self, public_id: &str) -> Result<(), anyhow::Error>;
}
