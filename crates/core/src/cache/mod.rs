mod error;
mod failure;
mod keys;
mod patterns;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use failure::{CacheFailureMode, ParseCacheFailureModeError};
pub use keys::{character_key, character_pattern, DEFAULT_KEY_PREFIX};
pub use patterns::pattern_matches;
pub use serialization::{deserialize_character, serialize_character, SerializationError};
pub use traits::Cache;
