use async_trait::async_trait;

use crate::character::{Character, CharacterId};

use super::Result;

/// Repository for character persistence.
#[async_trait]
pub trait CharacterRepository: Send + Sync {
    /// Gets a character by its ID.
    ///
    /// A missing character is `Ok(None)`, never an error.
    async fn find_by_id(&self, id: CharacterId) -> Result<Option<Character>>;

    /// Saves a character.
    ///
    /// Transient characters get a fresh, never reused id. Characters that
    /// already carry an id overwrite the record stored under it. Returns the
    /// persisted representation, id included.
    async fn save(&self, character: Character) -> Result<Character>;

    /// Removes every stored character.
    async fn delete_all(&self) -> Result<()>;

    /// Number of stored characters.
    async fn count(&self) -> Result<u64>;
}
