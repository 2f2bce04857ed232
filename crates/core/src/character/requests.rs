//! API request types for character operations.
//!
//! Shared between the server and client. Pure data, no I/O.

use serde::{Deserialize, Serialize};

use super::error::CharacterError;
use super::operations::validate_name;
use super::types::Character;

/// Request payload for creating a character.
///
/// `name` is optional at the type level so that a missing field reaches
/// validation instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCharacterRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateCharacterRequest {
    /// Create a new request with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            description: None,
        }
    }

    /// Set the character description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validate the request and convert it into a transient character.
    pub fn into_character(self) -> Result<Character, CharacterError> {
        let name = self.name.ok_or(CharacterError::MissingName)?;
        validate_name(&name)?;
        Ok(Character::new(name, self.description))
    }
}
