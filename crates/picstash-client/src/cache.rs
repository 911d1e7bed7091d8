//! Process-wide catalog listing cache.
//!
//! Stores fetched listing snapshots keyed by a listing identifier. Writers
//! invalidate a key after a successful registration so the next read of that
//! listing refetches. Invalidation is synchronous, idempotent, and
//! fire-and-forget; the cache may be invalidated concurrently by unrelated
//! writers.

use chrono::{DateTime, Utc};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, PoisonError};

use picstash_core::models::CatalogImage;

/// Listing key for the image catalog.
pub const IMAGES_LISTING_KEY: &str = "images";

/// A cached listing snapshot.
#[derive(Clone, Debug)]
pub struct CachedListing {
    pub images: Vec<CatalogImage>,
    pub fetched_at: DateTime<Utc>,
}

/// LRU cache of catalog listings, shared across the process.
pub struct CatalogCache {
    entries: Mutex<LruCache<String, CachedListing>>,
}

impl CatalogCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// The cached snapshot for a listing key, if present.
    pub fn get(&self, key: &str) -> Option<CachedListing> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    /// Store a freshly fetched listing under a key.
    pub fn store(&self, key: &str, images: Vec<CatalogImage>) {
        let listing = CachedListing {
            images,
            fetched_at: Utc::now(),
        };
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.put(key.to_string(), listing);
    }

    /// Drop the cached snapshot for a key so the next read refetches.
    ///
    /// Idempotent: invalidating an absent key is a no-op.
    pub fn invalidate(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.pop(key).is_some() {
            tracing::debug!(key, "Invalidated catalog listing");
        }
    }
}
