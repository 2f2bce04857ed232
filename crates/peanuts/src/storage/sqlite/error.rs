//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `RepositoryError`.

use peanuts_core::storage::RepositoryError;

/// Maps a rusqlite error to a RepositoryError.
///
/// # Error Mapping
///
/// - `SQLITE_CONSTRAINT_NOTNULL` → `RepositoryError::InvalidData`
/// - Open/busy/locked errors → `RepositoryError::ConnectionFailed`
/// - Row conversion failures → `RepositoryError::Serialization`
/// - All other errors → `RepositoryError::QueryFailed`
fn map_rusqlite_error(err: &rusqlite::Error) -> RepositoryError {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_NOTNULL =>
        {
            RepositoryError::InvalidData(format!("Missing required column: {err}"))
        }

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if matches!(
                sqlite_err.code,
                rusqlite::ErrorCode::CannotOpen
                    | rusqlite::ErrorCode::DatabaseBusy
                    | rusqlite::ErrorCode::DatabaseLocked
            ) =>
        {
            RepositoryError::ConnectionFailed(err.to_string())
        }

        rusqlite::Error::FromSqlConversionFailure(..)
        | rusqlite::Error::InvalidColumnType(..) => RepositoryError::Serialization(err.to_string()),

        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps a tokio_rusqlite error to a RepositoryError.
///
/// This is the main entry point for error mapping in async code.
pub fn map_tokio_rusqlite_error(err: tokio_rusqlite::Error) -> RepositoryError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => map_rusqlite_error(rusqlite_err),
        tokio_rusqlite::Error::Close(_) => {
            RepositoryError::ConnectionFailed("Connection closed unexpectedly".to_string())
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sqlite_failure(code: i32) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(rusqlite::ffi::Error::new(code), None)
    }

    #[test]
    fn test_not_null_maps_to_invalid_data() {
        let err = sqlite_failure(rusqlite::ffi::SQLITE_CONSTRAINT_NOTNULL);
        assert!(matches!(
            map_rusqlite_error(&err),
            RepositoryError::InvalidData(_)
        ));
    }

    #[test]
    fn test_busy_maps_to_connection_failed() {
        let err = sqlite_failure(rusqlite::ffi::SQLITE_BUSY);
        assert!(matches!(
            map_rusqlite_error(&err),
            RepositoryError::ConnectionFailed(_)
        ));
    }

    #[test]
    fn test_wrapped_rusqlite_error_is_unwrapped() {
        let err = tokio_rusqlite::Error::Rusqlite(sqlite_failure(rusqlite::ffi::SQLITE_LOCKED));
        assert!(matches!(
            map_tokio_rusqlite_error(err),
            RepositoryError::ConnectionFailed(_)
        ));
    }

    #[test]
    fn test_other_errors_map_to_query_failed() {
        let err = rusqlite::Error::InvalidQuery;
        assert!(matches!(
            map_rusqlite_error(&err),
            RepositoryError::QueryFailed(_)
        ));
    }
}
