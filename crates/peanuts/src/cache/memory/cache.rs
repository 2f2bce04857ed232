//! In-memory cache implementation with LRU eviction.
//!
//! Provides a thread-safe in-memory cache with TTL support using
//! tokio synchronization primitives and LRU eviction policy.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;

use peanuts_core::cache::{pattern_matches, Cache, Result};

/// A single cache entry with optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|d| Instant::now() + d);
        Self { value, expires_at }
    }

    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() > exp)
    }
}

/// In-memory cache implementation with LRU eviction.
///
/// Thread-safe cache using `Arc<RwLock<LruCache>>` for concurrent access.
/// Supports TTL with lazy expiration (expired entries are dropped when read).
/// A `max_entries` of 0 disables eviction entirely.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
}

impl MemoryCache {
    /// Creates a new in-memory cache.
    ///
    /// # Arguments
    ///
    /// * `max_entries` - Maximum number of entries before LRU eviction kicks in,
    ///   or 0 for an unbounded cache.
    pub fn new(max_entries: usize) -> Self {
        let store = match NonZeroUsize::new(max_entries) {
            Some(capacity) => LruCache::new(capacity),
            None => LruCache::unbounded(),
        };
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Number of entries currently held, expired ones included.
    #[cfg(test)]
    async fn entry_count(&self) -> usize {
        self.store.read().await.len()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        // Write lock: LRU lookups update recency.
        let mut store = self.store.write().await;

        match store.get(key) {
            Some(entry) if entry.is_expired() => {
                store.pop(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut store = self.store.write().await;
        store.put(key.to_string(), CacheEntry::new(value.to_vec(), ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.store.write().await.pop(key);
        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<()> {
        let mut store = self.store.write().await;
        let keys_to_delete: Vec<String> = store
            .iter()
            .filter(|(key, _)| pattern_matches(pattern, key))
            .map(|(key, _)| key.clone())
            .collect();

        for key in keys_to_delete {
            store.pop(&key);
        }

        Ok(())
    }
}
