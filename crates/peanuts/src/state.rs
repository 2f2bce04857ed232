//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. The character repository is a trait object, so the
//! storage and cache backends are chosen by feature flags at build time.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use rand::{rngs::StdRng, SeedableRng};

use peanuts_core::storage::CharacterRepository;

use crate::config::Config;

/// Shared application state.
///
/// This is cloned for each request handler and contains shared resources.
#[derive(Clone)]
pub struct AppState {
    /// Character repository (cached, wraps underlying storage).
    pub characters: Arc<dyn CharacterRepository>,
    /// Outbound HTTP client used by the chain endpoint.
    pub http: reqwest::Client,
    pub config: Arc<Config>,
    /// Generator behind every simulated outcome.
    rng: Arc<Mutex<StdRng>>,
}

impl AppState {
    fn build(
        characters: Arc<dyn CharacterRepository>,
        http: reqwest::Client,
        config: &Config,
    ) -> Self {
        let rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            characters,
            http,
            config: Arc::new(config.clone()),
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// Runs a draw against the shared generator.
    ///
    /// The lock is released before returning, so it is never held across an
    /// await point.
    pub fn draw<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut rng)
    }

    /// Sleeps for a simulated delay, unless latency simulation is disabled.
    pub async fn pause(&self, delay: Duration) {
        if self.config.simulate_latency {
            tokio::time::sleep(delay).await;
        }
    }
}

fn http_client() -> Result<reqwest::Client, anyhow::Error> {
    Ok(reqwest::Client::builder()
        .user_agent(concat!("peanuts/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

// ============================================================================
// Factory functions for different backend combinations
// ============================================================================

#[cfg(all(feature = "sqlite", feature = "memory"))]
mod sqlite_memory {
    use super::*;
    use crate::cache::memory::MemoryCache;
    use crate::storage::cached::CachedCharacterRepository;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage and in-memory cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let sqlite_repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            let memory_cache = Arc::new(MemoryCache::new(config.cache_max_entries));

            let characters = Arc::new(
                CachedCharacterRepository::new(sqlite_repo, memory_cache)
                    .with_ttl(config.cache_ttl())
                    .with_key_prefix(config.cache_key_prefix.clone())
                    .with_failure_mode(config.cache_failure_mode),
            );

            Ok(Self::build(characters, http_client()?, config))
        }
    }
}

#[cfg(all(feature = "sqlite", feature = "redis"))]
mod sqlite_redis {
    use super::*;
    use crate::cache::redis_impl::RedisCache;
    use crate::storage::cached::CachedCharacterRepository;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage and Redis cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let sqlite_repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            let redis_cache = Arc::new(RedisCache::new(&config.redis_url).await?);

            let characters = Arc::new(
                CachedCharacterRepository::new(sqlite_repo, redis_cache)
                    .with_ttl(config.cache_ttl())
                    .with_key_prefix(config.cache_key_prefix.clone())
                    .with_failure_mode(config.cache_failure_mode),
            );

            Ok(Self::build(characters, http_client()?, config))
        }
    }
}

#[cfg(all(feature = "inmemory", feature = "memory"))]
mod inmemory_memory {
    use super::*;
    use crate::cache::memory::MemoryCache;
    use crate::storage::cached::CachedCharacterRepository;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage and cache.
        /// Useful for testing without any external dependencies.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let inmemory_repo = Arc::new(InMemoryRepository::new());
            let memory_cache = Arc::new(MemoryCache::new(config.cache_max_entries));

            let characters = Arc::new(
                CachedCharacterRepository::new(inmemory_repo, memory_cache)
                    .with_ttl(config.cache_ttl())
                    .with_key_prefix(config.cache_key_prefix.clone())
                    .with_failure_mode(config.cache_failure_mode),
            );

            Ok(Self::build(characters, http_client()?, config))
        }
    }
}

#[cfg(all(feature = "inmemory", feature = "redis"))]
mod inmemory_redis {
    use super::*;
    use crate::cache::redis_impl::RedisCache;
    use crate::storage::cached::CachedCharacterRepository;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage and Redis cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let inmemory_repo = Arc::new(InMemoryRepository::new());
            let redis_cache = Arc::new(RedisCache::new(&config.redis_url).await?);

            let characters = Arc::new(
                CachedCharacterRepository::new(inmemory_repo, redis_cache)
                    .with_ttl(config.cache_ttl())
                    .with_key_prefix(config.cache_key_prefix.clone())
                    .with_failure_mode(config.cache_failure_mode),
            );

            Ok(Self::build(characters, http_client()?, config))
        }
    }
}

// ============================================================================
// Test support - provides Default implementation for unit tests
// ============================================================================
