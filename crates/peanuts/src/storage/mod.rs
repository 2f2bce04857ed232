//! Storage backend implementations.
//!
//! This module provides concrete implementations of the repository trait
//! defined in `peanuts_core::storage`. The backend is selected at compile time
//! via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): HashMap-backed storage, lost on restart
//! - `sqlite`: SQLite storage backend using `rusqlite` and `tokio-rusqlite`
//!
//! These features are mutually exclusive - only one storage backend can be
//! enabled at a time.
//!
//! # Examples
//!
//! Build with SQLite:
//! ```bash
//! cargo build -p peanuts --no-default-features --features sqlite,memory
//! ```

// Compile-time checks for mutual exclusivity
#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!(
    "Features 'sqlite' and 'inmemory' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "sqlite", feature = "inmemory")))]
compile_error!(
    "No storage backend selected. Enable 'inmemory' or 'sqlite' feature. \
    Example: cargo build -p peanuts --features sqlite"
);

pub mod cached;

// The in-memory backend also backs the router tests.
#[cfg(any(test, feature = "inmemory"))]
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(test, feature = "inmemory"))]
pub use inmemory::InMemoryRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;
