use thiserror::Error;

/// Errors that can occur during repository operations.
///
/// A missing character is not an error: lookups return `Ok(None)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Cache unavailable: {0}")]
    Cache(String),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
