//! In-memory cache backend implementation.
//!
//! Provides a thread-safe LRU cache with optional TTL for single-instance
//! deployments.

mod cache;

pub use cache::MemoryCache;
