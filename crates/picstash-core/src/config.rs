//! Configuration module
//!
//! Environment-driven settings for the client components: API and upload host
//! endpoints, authentication, and HTTP behavior.

use std::env;

const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_UPLOAD_PATH: &str = "/upload";
const HTTP_TIMEOUT_SECS: u64 = 60;
const LISTING_CACHE_CAPACITY: usize = 16;

/// Client configuration shared by the uploader, API client, and CLI.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the catalog API (`POST /api/images`, `GET /api/images`).
    pub api_url: String,
    /// Endpoint of the asset upload host.
    pub upload_url: String,
    /// Optional API key sent as `X-API-Key`.
    pub api_key: Option<String>,
    pub http_timeout_secs: u64,
    /// Number of listing snapshots the catalog cache retains.
    pub listing_cache_capacity: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            upload_url: format!("{}{}", DEFAULT_API_URL, DEFAULT_UPLOAD_PATH),
            api_key: None,
            http_timeout_secs: HTTP_TIMEOUT_SECS,
            listing_cache_capacity: LISTING_CACHE_CAPACITY,
        }
    }
}

impl ClientConfig {
    /// Build configuration from environment variables, falling back to
    /// defaults: PICSTASH_API_URL, PICSTASH_UPLOAD_URL, PICSTASH_API_KEY,
    /// PICSTASH_HTTP_TIMEOUT_SECS, PICSTASH_LISTING_CACHE_CAPACITY.
    pub fn from_env() -> Self {
        let api_url = env::var("PICSTASH_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let upload_url = env::var("PICSTASH_UPLOAD_URL")
            .unwrap_or_else(|_| format!("{}{}", api_url, DEFAULT_UPLOAD_PATH));

        Self {
            upload_url,
            api_key: env::var("PICSTASH_API_KEY").ok(),
            http_timeout_secs: env_parse("PICSTASH_HTTP_TIMEOUT_SECS", HTTP_TIMEOUT_SECS),
            listing_cache_capacity: env_parse(
                "PICSTASH_LISTING_CACHE_CAPACITY",
                LISTING_CACHE_CAPACITY,
            ),
            api_url,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Invalid value, using default");
            default
        }),
        Err(_) => default,
    }
}
