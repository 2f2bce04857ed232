//! JSON (de)serialization of domain types to and from cache bytes.

use crate::character::Character;
use thiserror::Error;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes a character to JSON bytes.
pub fn serialize_character(character: &Character) -> Result<Vec<u8>> {
    serde_json::to_vec(character).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a character.
pub fn deserialize_character(bytes: &[u8]) -> Result<Character> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}
