use super::RepositoryError;

/// Maps a repository error to the HTTP status code returned to callers.
///
/// Backend outages (store or cache) surface as 503 so they stay distinguishable
/// from the simulated 500s produced on purpose by the demo endpoints.
///
/// # Examples
///
/// ```
/// use peanuts_core::storage::{repository_error_to_status_code, RepositoryError};
///
/// let error = RepositoryError::ConnectionFailed("database is locked".to_string());
/// assert_eq!(repository_error_to_status_code(&error), 503);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::QueryFailed(_) => 500,
        RepositoryError::Serialization(_) => 500,
        RepositoryError::InvalidData(_) => 400,
        RepositoryError::Cache(_) => 503,
    }
}
