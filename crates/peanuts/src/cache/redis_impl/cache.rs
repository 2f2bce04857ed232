//! Redis cache implementation.
//!
//! Values are stored as plain strings under their key, so entries written by
//! this service are readable by any other client sharing the keyspace.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use peanuts_core::cache::{Cache, Result};

use super::error::map_redis_error;

/// Redis cache backend using connection manager for pooling.
pub struct RedisCache {
    conn: redis::aio::ConnectionManager,
}

impl RedisCache {
    /// Creates a new Redis cache connection.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://localhost:6379")
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if the connection cannot be established.
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let result: Option<Vec<u8>> = conn.get(key).await.map_err(map_redis_error)?;
        Ok(result)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.conn.clone();

        match ttl {
            Some(duration) => {
                // SET EX has second granularity.
                let seconds = duration.as_secs().max(1);
                conn.set_ex::<_, _, ()>(key, value, seconds)
                    .await
                    .map_err(map_redis_error)?;
            }
            None => {
                conn.set::<_, _, ()>(key, value)
                    .await
                    .map_err(map_redis_error)?;
            }
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key).await.map_err(map_redis_error)?;
        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<()> {
        let mut conn = self.conn.clone();

        // KEYS blocks the server while it walks the keyspace; this only runs
        // from `delete_all`, which is reserved for test isolation.
        let keys: Vec<String> = conn.keys(pattern).await.map_err(map_redis_error)?;

        if !keys.is_empty() {
            conn.del::<_, ()>(&keys).await.map_err(map_redis_error)?;
        }

        tracing::debug!(pattern, deleted = keys.len(), "Deleted cache keys by pattern");
        Ok(())
    }
}
