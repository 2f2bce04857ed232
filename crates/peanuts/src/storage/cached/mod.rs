//! Cached repository decorator.
//!
//! Wraps a `CharacterRepository` with a read-through, write-through cache:
//!
//! - **Reads**: Check cache first, on miss fetch from repository and populate cache
//! - **Writes**: Persist to repository, then overwrite the cache entry
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! let repo = Arc::new(SqliteRepository::new("peanuts.db").await?);
//! let cache = Arc::new(MemoryCache::new(10_000));
//!
//! let cached_repo = CachedCharacterRepository::new(repo, cache)
//!     .with_key_prefix("peanuts")
//!     .with_failure_mode(CacheFailureMode::Fail);
//! ```

mod character;

pub use character::CachedCharacterRepository;
