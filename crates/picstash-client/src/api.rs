//! Domain methods for the catalog API.
//!
//! Registration (`POST /api/images`) and the read-side listing the cache
//! invalidation contract exists for.

use crate::cache::{CatalogCache, IMAGES_LISTING_KEY};
use crate::ApiClient;
use anyhow::Result;
use async_trait::async_trait;
use picstash_core::models::{CatalogImage, NewImage};

/// Path of the image catalog endpoint.
pub const IMAGES_PATH: &str = "/api/images";

/// Persists a catalog entry for an uploaded asset.
///
/// Failure carries no structured reason; any fault is reported uniformly to
/// the user by the submission workflow.
#[async_trait]
pub trait MetadataRegistrar: Send + Sync {
    async fn register(&self, entry: &NewImage) -> Result<()>;
}

#[async_trait]
impl MetadataRegistrar for ApiClient {
    async fn register(&self, entry: &NewImage) -> Result<()> {
        self.register_image(entry).await
    }
}

impl ApiClient {
    /// Register image metadata against the catalog. Success is any 2xx.
    pub async fn register_image(&self, entry: &NewImage) -> Result<()> {
        tracing::debug!(url = %entry.url, title = %entry.title, "Registering catalog entry");
        self.post_json(IMAGES_PATH, entry).await
    }

    /// Fetch the catalog listing from the API, bypassing the cache.
    pub async fn fetch_images(&self) -> Result<Vec<CatalogImage>> {
        self.get(IMAGES_PATH, &[]).await
    }

    /// Read the catalog listing through the process-wide cache.
    ///
    /// Serves the cached snapshot when present; otherwise refetches and
    /// stores the result under the listing key.
    pub async fn list_images(&self, cache: &CatalogCache) -> Result<Vec<CatalogImage>> {
        if let Some(listing) = cache.get(IMAGES_LISTING_KEY) {
            tracing::debug!(key = IMAGES_LISTING_KEY, "Serving listing from cache");
            return Ok(listing.images);
        }

        let images = self.fetch_images().await?;
        cache.store(IMAGES_LISTING_KEY, images.clone());
        Ok(images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry() -> NewImage {
        NewImage {
            url: "https://cdn/x.png".to_string(),
            title: "Sunset".to_string(),
            description: "A nice view".to_string(),
        }
    }

    #[tokio::test]
    async fn register_image_posts_json_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/images")
            .match_body(mockito::Matcher::Json(json!({
                "url": "https://cdn/x.png",
                "title": "Sunset",
                "description": "A nice view",
            })))
            .with_status(201)
            .create_async()
            .await;

        let client = ApiClient::new(server.url(), None, 5).unwrap();
        client.register_image(&entry()).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn register_image_fails_on_non_2xx() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/images")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = ApiClient::new(server.url(), None, 5).unwrap();
        let err = client.register_image(&entry()).await.unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn register_image_sends_api_key_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/images")
            .match_header("X-API-Key", "secret")
            .with_status(200)
            .create_async()
            .await;

        let client = ApiClient::new(
            server.url(),
            Some(crate::Auth::XApiKey("secret".to_string())),
            5,
        )
        .unwrap();
        client.register_image(&entry()).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn list_images_is_cache_aside() {
        let mut server = mockito::Server::new_async().await;
        let listing = json!([{
            "id": "7a0b6f3c-1f3a-4f93-9f5e-0d4a1a9c2b11",
            "url": "https://cdn/x.png",
            "title": "Sunset",
            "description": "A nice view",
            "uploaded_at": "2024-05-01T12:00:00Z",
        }]);
        let mock = server
            .mock("GET", "/api/images")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(listing.to_string())
            .expect(1)
            .create_async()
            .await;

        let client = ApiClient::new(server.url(), None, 5).unwrap();
        let cache = CatalogCache::new(4);

        let first = client.list_images(&cache).await.unwrap();
        let second = client.list_images(&cache).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);

        // One network round-trip; the second read was served from the cache.
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn list_images_refetches_after_invalidation() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/images")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .expect(2)
            .create_async()
            .await;

        let client = ApiClient::new(server.url(), None, 5).unwrap();
        let cache = CatalogCache::new(4);

        client.list_images(&cache).await.unwrap();
        cache.invalidate(IMAGES_LISTING_KEY);
        client.list_images(&cache).await.unwrap();

        mock.assert_async().await;
    }
}
