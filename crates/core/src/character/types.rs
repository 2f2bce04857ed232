use std::fmt;

use serde::{Deserialize, Serialize};

use super::CharacterError;

/// Store-assigned identifier of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(i64);

impl CharacterId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CharacterId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// A Peanuts character.
///
/// A character without an id is transient. The id can only be attached through
/// [`Character::into_persisted`], which storage backends call once the record
/// has been written; after that the id never changes.
///
/// `Deserialize` restores the id as stored and is reserved for reading back
/// representations this system produced: cache entries and client responses.
/// Untrusted input goes through [`CreateCharacterRequest`](super::CreateCharacterRequest),
/// which has no id field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    id: Option<CharacterId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Character {
    /// Creates a transient character.
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description,
        }
    }

    pub fn id(&self) -> Option<CharacterId> {
        self.id
    }

    pub fn is_transient(&self) -> bool {
        self.id.is_none()
    }

    /// Attaches the store-assigned id.
    ///
    /// Attaching the id a character already carries is a no-op; attaching a
    /// different one is rejected.
    pub fn into_persisted(self, id: CharacterId) -> Result<Self, CharacterError> {
        match self.id {
            Some(existing) if existing != id => Err(CharacterError::IdAlreadyAssigned {
                existing,
                requested: id,
            }),
            _ => Ok(Self {
                id: Some(id),
                ..self
            }),
        }
    }
}
