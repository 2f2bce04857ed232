//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use peanuts_core::character::{validate_character, Character, CharacterId};
use peanuts_core::storage::{CharacterRepository, RepositoryError, Result};

/// In-memory storage backend.
///
/// Ids come from a monotonically increasing sequence that is never rewound,
/// so an id is never handed out twice, not even after `delete_all`.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    characters: Arc<RwLock<HashMap<CharacterId, Character>>>,
    next_id: Arc<AtomicI64>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            characters: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

#[async_trait]
impl CharacterRepository for InMemoryRepository {
    async fn find_by_id(&self, id: CharacterId) -> Result<Option<Character>> {
        let characters = self.characters.read().await;
        Ok(characters.get(&id).cloned())
    }

    async fn save(&self, character: Character) -> Result<Character> {
        validate_character(&character).map_err(|e| RepositoryError::InvalidData(e.to_string()))?;

        let mut characters = self.characters.write().await;

        let id = match character.id() {
            Some(id) => {
                // Keep the sequence ahead of explicitly supplied ids.
                self.next_id.fetch_max(id.get() + 1, Ordering::SeqCst);
                id
            }
            None => CharacterId::new(self.next_id.fetch_add(1, Ordering::SeqCst)),
        };

        let persisted = character
            .into_persisted(id)
            .map_err(|e| RepositoryError::InvalidData(e.to_string()))?;
        characters.insert(id, persisted.clone());
        Ok(persisted)
    }

    async fn delete_all(&self) -> Result<()> {
        self.characters.write().await.clear();
        Ok(())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.characters.read().await.len() as u64)
    }
}
