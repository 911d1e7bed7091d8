//! Asset uploader.
//!
//! The uploader accepts a binary payload and resolves to a stable content
//! URL. The workflow treats it as opaque: no retry, and a fault simply leaves
//! the pending upload without a remote URL.

use anyhow::{Context, Result};
use async_trait::async_trait;
use picstash_core::models::ImageFile;
use picstash_core::{AppError, ClientConfig};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use uuid::Uuid;

/// Uploads a binary asset and returns its content URL.
#[async_trait]
pub trait AssetUploader: Send + Sync {
    async fn upload(&self, file: &ImageFile) -> Result<String, AppError>;
}

/// Response shape of the upload host.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

/// Uploader that posts multipart payloads to an HTTP upload host.
pub struct HttpAssetUploader {
    client: Client,
    upload_url: String,
}

impl HttpAssetUploader {
    pub fn new(upload_url: String, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, upload_url })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(config.upload_url.clone(), config.http_timeout_secs)
    }
}

#[async_trait]
impl AssetUploader for HttpAssetUploader {
    async fn upload(&self, file: &ImageFile) -> Result<String, AppError> {
        let upload_id = Uuid::new_v4();
        tracing::info!(
            %upload_id,
            filename = %file.filename,
            size = file.size(),
            "Uploading asset"
        );

        let part = reqwest::multipart::Part::bytes(file.data.to_vec())
            .file_name(file.filename.clone())
            .mime_str(&file.content_type)
            .map_err(|err| AppError::Upload(format!("Invalid content type: {}", err)))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| AppError::Upload(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Upload(format!(
                "Upload host returned {}: {}",
                status, error_text
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|err| AppError::Upload(format!("Failed to parse upload response: {}", err)))?;

        tracing::info!(%upload_id, url = %body.url, "Asset upload resolved");
        Ok(body.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png() -> ImageFile {
        ImageFile::new("sunset.png", "image/png", vec![0u8; 64])
    }

    #[tokio::test]
    async fn upload_resolves_to_content_url() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/upload")
            .match_header(
                "content-type",
                mockito::Matcher::Regex("^multipart/form-data".to_string()),
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"url":"https://cdn/x.png"}"#)
            .create_async()
            .await;

        let uploader =
            HttpAssetUploader::new(format!("{}/upload", server.url()), 5).unwrap();
        let url = uploader.upload(&png()).await.unwrap();
        assert_eq!(url, "https://cdn/x.png");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn upload_fault_is_typed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/upload")
            .with_status(503)
            .with_body("storage unavailable")
            .create_async()
            .await;

        let uploader =
            HttpAssetUploader::new(format!("{}/upload", server.url()), 5).unwrap();
        let err = uploader.upload(&png()).await.unwrap_err();
        assert!(matches!(err, AppError::Upload(_)));
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn malformed_upload_response_is_a_fault() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/upload")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let uploader =
            HttpAssetUploader::new(format!("{}/upload", server.url()), 5).unwrap();
        let err = uploader.upload(&png()).await.unwrap_err();
        assert!(matches!(err, AppError::Upload(_)));
    }
}
