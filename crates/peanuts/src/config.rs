use std::{env, str::FromStr, time::Duration};

use peanuts_core::cache::{CacheFailureMode, DEFAULT_KEY_PREFIX};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache TTL in seconds, 0 disables expiry (default: 0)
    pub cache_ttl_seconds: u64,
    /// Maximum number of in-memory cache entries, 0 means unbounded (default: 10,000)
    pub cache_max_entries: usize,
    /// Namespace for cache keys (default: "peanuts")
    pub cache_key_prefix: String,
    /// Behavior when the cache backend errors (default: degrade)
    pub cache_failure_mode: CacheFailureMode,
    /// Path to SQLite database file (default: "peanuts.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[allow(dead_code)]
    pub sqlite_path: String,
    /// Redis connection URL (default: "redis://localhost:6379")
    /// Note: Only used when the `redis` feature is enabled.
    #[allow(dead_code)]
    pub redis_url: String,
    /// Host serving `/io_task` for the chain endpoint (default: "localhost")
    pub target_one_host: String,
    /// Host serving `/cpu_task` for the chain endpoint (default: "localhost")
    pub target_two_host: String,
    /// Port used for every chain call (default: 8080)
    pub chain_port: u16,
    /// Whether simulated sleeps actually sleep (default: true)
    pub simulate_latency: bool,
    /// Seed for the shared random generator (default: unset, seeded from the OS)
    pub random_seed: Option<u64>,
    /// Router-level request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
}

/// Parses an optional environment variable. Malformed values are logged and
/// treated as unset.
fn env_opt<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring malformed environment variable");
            None
        }
    }
}

/// Parses an environment variable, falling back to `default` when it is
/// missing or malformed.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env_opt(key).unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CACHE_TTL_SECONDS` - Cache TTL in seconds, 0 = no expiry (default: 0)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries, 0 = unbounded (default: 10,000)
    /// - `CACHE_KEY_PREFIX` - Cache key namespace (default: "peanuts")
    /// - `CACHE_FAILURE_MODE` - "degrade" or "fail" (default: "degrade")
    /// - `SQLITE_PATH` - SQLite database path (default: "peanuts.db")
    /// - `REDIS_URL` - Redis connection URL (default: "redis://localhost:6379")
    /// - `TARGET_ONE_HOST` / `TARGET_TWO_HOST` - Chain targets (default: "localhost")
    /// - `CHAIN_PORT` - Port for chain calls (default: 8080)
    /// - `SIMULATE_LATENCY` - Enable simulated sleeps (default: true)
    /// - `RANDOM_SEED` - Seed for reproducible outcomes (default: unset)
    /// - `REQUEST_TIMEOUT_SECONDS` - Request timeout (default: 10)
    pub fn from_env() -> Self {
        Self {
            cache_ttl_seconds: env_or("CACHE_TTL_SECONDS", 0),
            cache_max_entries: env_or("CACHE_MAX_ENTRIES", 10_000),
            cache_key_prefix: env::var("CACHE_KEY_PREFIX")
                .unwrap_or_else(|_| DEFAULT_KEY_PREFIX.to_string()),
            cache_failure_mode: env_or("CACHE_FAILURE_MODE", CacheFailureMode::Degrade),
            sqlite_path: env::var("SQLITE_PATH").unwrap_or_else(|_| "peanuts.db".to_string()),
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            target_one_host: env::var("TARGET_ONE_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            target_two_host: env::var("TARGET_TWO_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            chain_port: env_or("CHAIN_PORT", 8080),
            simulate_latency: env_or("SIMULATE_LATENCY", true),
            random_seed: env_opt("RANDOM_SEED"),
            request_timeout_seconds: env_or("REQUEST_TIMEOUT_SECONDS", 10),
        }
    }

    /// Get cache TTL as a Duration, `None` when entries never expire.
    pub fn cache_ttl(&self) -> Option<Duration> {
        (self.cache_ttl_seconds > 0).then(|| Duration::from_secs(self.cache_ttl_seconds))
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// URLs called, in order, by the chain endpoint.
    pub fn chain_urls(&self) -> [String; 3] {
        [
            format!("http://localhost:{}/", self.chain_port),
            format!("http://{}:{}/io_task", self.target_one_host, self.chain_port),
            format!("http://{}:{}/cpu_task", self.target_two_host, self.chain_port),
        ]
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
