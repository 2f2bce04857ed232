//! In-memory storage backend.
//!
//! Stores characters in a HashMap wrapped in `Arc<RwLock<_>>`. Useful for
//! development and tests where persistence is not required.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! let saved = repo.save(Character::new("Snoopy", None)).await?;
//! ```

mod repository;

pub use repository::InMemoryRepository;
