use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// What the cached repository does when the cache backend itself errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CacheFailureMode {
    /// Log the cache error and continue with store-only behavior.
    #[default]
    Degrade,
    /// Fail the operation with the cache error.
    Fail,
}

/// Returned when a cache failure mode string is not recognized.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown cache failure mode '{0}' (expected 'degrade' or 'fail')")]
pub struct ParseCacheFailureModeError(pub String);

impl FromStr for CacheFailureMode {
    type Err = ParseCacheFailureModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "degrade" => Ok(Self::Degrade),
            "fail" => Ok(Self::Fail),
            other => Err(ParseCacheFailureModeError(other.to_string())),
        }
    }
}

impl fmt::Display for CacheFailureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Degrade => write!(f, "degrade"),
            Self::Fail => write!(f, "fail"),
        }
    }
}
