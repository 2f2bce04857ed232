use crate::character::CharacterId;

/// Key namespace used when none is configured.
pub const DEFAULT_KEY_PREFIX: &str = "peanuts";

/// Returns the cache key for a single character.
pub fn character_key(prefix: &str, id: CharacterId) -> String {
    format!("{}::{}", prefix, id)
}

/// Returns the pattern matching every character key under a prefix.
pub fn character_pattern(prefix: &str) -> String {
    format!("{}::*", prefix)
}
