//! Cached character repository decorator.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use peanuts_core::cache::{
    character_key, character_pattern, deserialize_character, serialize_character, Cache,
    CacheError, CacheFailureMode, DEFAULT_KEY_PREFIX,
};
use peanuts_core::character::{Character, CharacterId};
use peanuts_core::storage::{CharacterRepository, RepositoryError, Result};

/// Cached character repository decorator.
///
/// - `find_by_id` reads through the cache. Absent characters are never cached,
///   so repeated lookups of a missing id always reach the repository.
/// - `save` persists first and then unconditionally overwrites the cache entry
///   at the persisted id.
///
/// Repository errors propagate unmodified. Cache errors are handled according
/// to the configured [`CacheFailureMode`].
///
/// When a save can neither overwrite nor drop the cached entry, the key is
/// marked stale and reads bypass the cache for it until a later write to that
/// key succeeds.
///
/// # Type Parameters
///
/// * `R` - The underlying repository implementation
/// * `C` - The cache implementation
pub struct CachedCharacterRepository<R, C>
where
    R: CharacterRepository,
    C: Cache,
{
    repository: Arc<R>,
    cache: Arc<C>,
    ttl: Option<Duration>,
    key_prefix: String,
    failure_mode: CacheFailureMode,
    stale_keys: RwLock<HashSet<String>>,
}

impl<R, C> CachedCharacterRepository<R, C>
where
    R: CharacterRepository,
    C: Cache,
{
    /// Creates a new cached repository with no expiry, the default key
    /// prefix and degrade-on-failure behavior.
    pub fn new(repository: Arc<R>, cache: Arc<C>) -> Self {
        Self {
            repository,
            cache,
            ttl: None,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            failure_mode: CacheFailureMode::default(),
            stale_keys: RwLock::new(HashSet::new()),
        }
    }

    /// Sets the time-to-live for cached characters. `None` keeps them until evicted.
    pub fn with_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the namespace for cache keys.
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Sets what happens when the cache backend errors.
    pub fn with_failure_mode(mut self, mode: CacheFailureMode) -> Self {
        self.failure_mode = mode;
        self
    }

    /// Applies the failure mode to a cache error.
    fn on_cache_error(&self, operation: &'static str, err: CacheError) -> Result<()> {
        match self.failure_mode {
            CacheFailureMode::Degrade => {
                tracing::warn!(operation, error = %err, "Cache unavailable, continuing without it");
                Ok(())
            }
            CacheFailureMode::Fail => Err(RepositoryError::Cache(err.to_string())),
        }
    }

    /// Writes a persisted character into the cache.
    async fn store_in_cache(&self, key: &str, character: &Character) -> Result<()> {
        let bytes = match serialize_character(character) {
            Ok(bytes) => bytes,
            Err(err) => {
                return self.on_cache_error("serialize", CacheError::Serialization(err.to_string()))
            }
        };

        if let Err(err) = self.cache.set(key, &bytes, self.ttl).await {
            // The previous value must not outlive a failed overwrite.
            match self.cache.delete(key).await {
                Ok(()) => self.clear_stale(key).await,
                Err(delete_err) => {
                    tracing::warn!(key, error = %delete_err, "Failed to drop stale cache entry, bypassing cache for key");
                    self.stale_keys.write().await.insert(key.to_string());
                }
            }
            return self.on_cache_error("set", err);
        }

        self.clear_stale(key).await;
        Ok(())
    }

    async fn is_stale(&self, key: &str) -> bool {
        self.stale_keys.read().await.contains(key)
    }

    async fn clear_stale(&self, key: &str) {
        if self.is_stale(key).await {
            self.stale_keys.write().await.remove(key);
        }
    }
}

#[async_trait]
impl<R, C> CharacterRepository for CachedCharacterRepository<R, C>
where
    R: CharacterRepository + 'static,
    C: Cache + 'static,
{
    async fn find_by_id(&self, id: CharacterId) -> Result<Option<Character>> {
        let cache_key = character_key(&self.key_prefix, id);

        let cached = if self.is_stale(&cache_key).await {
            tracing::debug!(character_id = %id, "Cache entry marked stale, reading from store");
            Ok(None)
        } else {
            self.cache.get(&cache_key).await
        };

        match cached {
            Ok(Some(bytes)) => match deserialize_character(&bytes) {
                Ok(character) => {
                    tracing::trace!(character_id = %id, "Cache hit for character");
                    return Ok(Some(character));
                }
                // Undecodable entries are a miss and get overwritten below.
                Err(err) => {
                    tracing::warn!(character_id = %id, error = %err, "Cache character deserialization failed");
                }
            },
            Ok(None) => {}
            Err(err) => self.on_cache_error("get", err)?,
        }

        tracing::trace!(character_id = %id, "Cache miss for character");
        let character = self.repository.find_by_id(id).await?;

        if let Some(ref c) = character {
            self.store_in_cache(&cache_key, c).await?;
        }

        Ok(character)
    }

    async fn save(&self, character: Character) -> Result<Character> {
        let persisted = self.repository.save(character).await?;

        let Some(id) = persisted.id() else {
            return Err(RepositoryError::InvalidData(
                "Repository returned a character without an id".to_string(),
            ));
        };

        self.store_in_cache(&character_key(&self.key_prefix, id), &persisted)
            .await?;

        tracing::debug!(character_id = %id, name = %persisted.name, "Character saved");
        Ok(persisted)
    }

    async fn delete_all(&self) -> Result<()> {
        self.repository.delete_all().await?;

        let pattern = character_pattern(&self.key_prefix);
        match self.cache.delete_pattern(&pattern).await {
            Ok(()) => self.stale_keys.write().await.clear(),
            Err(err) => self.on_cache_error("delete_pattern", err)?,
        }

        tracing::debug!("All characters deleted");
        Ok(())
    }

    async fn count(&self) -> Result<u64> {
        self.repository.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use peanuts_core::cache::{pattern_matches, Result as CacheResult};

    // Mock repository that tracks calls
    struct MockCharacterRepository {
        characters: RwLock<HashMap<CharacterId, Character>>,
        next_id: AtomicUsize,
        find_calls: AtomicUsize,
        unavailable: AtomicBool,
    }

    impl MockCharacterRepository {
        fn new() -> Self {
            Self {
                characters: RwLock::new(HashMap::new()),
                next_id: AtomicUsize::new(1),
                find_calls: AtomicUsize::new(0),
                unavailable: AtomicBool::new(false),
            }
        }

        fn find_calls(&self) -> usize {
            self.find_calls.load(Ordering::SeqCst)
        }

        fn check_available(&self) -> Result<()> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(RepositoryError::ConnectionFailed(
                    "connection refused".to_string(),
                ));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl CharacterRepository for MockCharacterRepository {
        async fn find_by_id(&self, id: CharacterId) -> Result<Option<Character>> {
            self.find_calls.fetch_add(1, Ordering::SeqCst);
            self.check_available()?;
            Ok(self.characters.read().await.get(&id).cloned())
        }

        async fn save(&self, character: Character) -> Result<Character> {
            self.check_available()?;
            let id = character.id().unwrap_or_else(|| {
                CharacterId::new(self.next_id.fetch_add(1, Ordering::SeqCst) as i64)
            });
            let persisted = character.into_persisted(id).unwrap();
            self.characters.write().await.insert(id, persisted.clone());
            Ok(persisted)
        }

        async fn delete_all(&self) -> Result<()> {
            self.check_available()?;
            self.characters.write().await.clear();
            Ok(())
        }

        async fn count(&self) -> Result<u64> {
            self.check_available()?;
            Ok(self.characters.read().await.len() as u64)
        }
    }

    // Simple in-memory cache for testing. Writes can be switched off to
    // emulate a backend that still serves reads.
    struct MockCache {
        data: RwLock<HashMap<String, Vec<u8>>>,
        ttls: RwLock<Vec<Option<Duration>>>,
        set_fails: AtomicBool,
        delete_fails: AtomicBool,
    }

    impl MockCache {
        fn new() -> Self {
            Self {
                data: RwLock::new(HashMap::new()),
                ttls: RwLock::new(Vec::new()),
                set_fails: AtomicBool::new(false),
                delete_fails: AtomicBool::new(false),
            }
        }

        fn fail_writes(&self, set: bool, delete: bool) {
            self.set_fails.store(set, Ordering::SeqCst);
            self.delete_fails.store(delete, Ordering::SeqCst);
        }

        async fn recorded_ttls(&self) -> Vec<Option<Duration>> {
            self.ttls.read().await.clone()
        }

        async fn contains(&self, key: &str) -> bool {
            self.data.read().await.contains_key(key)
        }
    }

    #[async_trait]
    impl Cache for MockCache {
        async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
            Ok(self.data.read().await.get(key).cloned())
        }

        async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> CacheResult<()> {
            if self.set_fails.load(Ordering::SeqCst) {
                return Err(CacheError::OperationFailed("READONLY".to_string()));
            }
            self.ttls.write().await.push(ttl);
            self.data
                .write()
                .await
                .insert(key.to_string(), value.to_vec());
            Ok(())
        }

        async fn delete(&self, key: &str) -> CacheResult<()> {
            if self.delete_fails.load(Ordering::SeqCst) {
                return Err(CacheError::OperationFailed("READONLY".to_string()));
            }
            self.data.write().await.remove(key);
            Ok(())
        }

        async fn delete_pattern(&self, pattern: &str) -> CacheResult<()> {
            self.data
                .write()
                .await
                .retain(|key, _| !pattern_matches(pattern, key));
            Ok(())
        }
    }

    // Cache whose backend is always down
    struct FailingCache;

    #[async_trait]
    impl Cache for FailingCache {
        async fn get(&self, _key: &str) -> CacheResult<Option<Vec<u8>>> {
            Err(CacheError::ConnectionFailed("refused".to_string()))
        }

        async fn set(&self, _key: &str, _value: &[u8], _ttl: Option<Duration>) -> CacheResult<()> {
            Err(CacheError::ConnectionFailed("refused".to_string()))
        }

        async fn delete(&self, _key: &str) -> CacheResult<()> {
            Err(CacheError::ConnectionFailed("refused".to_string()))
        }

        async fn delete_pattern(&self, _pattern: &str) -> CacheResult<()> {
            Err(CacheError::ConnectionFailed("refused".to_string()))
        }
    }

    fn cached(
        repo: &Arc<MockCharacterRepository>,
        cache: &Arc<MockCache>,
    ) -> CachedCharacterRepository<MockCharacterRepository, MockCache> {
        CachedCharacterRepository::new(repo.clone(), cache.clone())
    }

    #[tokio::test]
    async fn test_second_read_is_served_from_cache() {
        let repo = Arc::new(MockCharacterRepository::new());
        let cache = Arc::new(MockCache::new());
        let stored = repo
            .save(Character::new("Snoopy", Some("Beagle".to_string())))
            .await
            .unwrap();
        let id = stored.id().unwrap();
        let cached_repo = cached(&repo, &cache);

        let first = cached_repo.find_by_id(id).await.unwrap();
        assert_eq!(first.as_ref(), Some(&stored));
        assert_eq!(repo.find_calls(), 1);
        assert!(cache.contains("peanuts::1").await);

        let second = cached_repo.find_by_id(id).await.unwrap();
        assert_eq!(second, first);
        assert_eq!(repo.find_calls(), 1);
    }

    #[tokio::test]
    async fn test_save_writes_through_without_store_read() {
        let repo = Arc::new(MockCharacterRepository::new());
        let cache = Arc::new(MockCache::new());
        let cached_repo = cached(&repo, &cache);

        let saved = cached_repo
            .save(Character::new("Woodstock", None))
            .await
            .unwrap();
        let found = cached_repo.find_by_id(saved.id().unwrap()).await.unwrap();

        assert_eq!(found, Some(saved));
        assert_eq!(repo.find_calls(), 0);
    }

    #[tokio::test]
    async fn test_save_replaces_cached_value() {
        let repo = Arc::new(MockCharacterRepository::new());
        let cache = Arc::new(MockCache::new());
        let cached_repo = cached(&repo, &cache);

        let saved = cached_repo
            .save(Character::new("Lucy", None))
            .await
            .unwrap();
        // Warm the cache through a read.
        cached_repo.find_by_id(saved.id().unwrap()).await.unwrap();

        let mut updated = saved.clone();
        updated.description = Some("Psychiatric help 5 cents".to_string());
        cached_repo.save(updated.clone()).await.unwrap();

        let found = cached_repo.find_by_id(saved.id().unwrap()).await.unwrap();
        assert_eq!(found, Some(updated));
        assert_eq!(repo.find_calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_character_is_not_cached() {
        let repo = Arc::new(MockCharacterRepository::new());
        let cache = Arc::new(MockCache::new());
        let cached_repo = cached(&repo, &cache);
        let id = CharacterId::new(99);

        assert!(cached_repo.find_by_id(id).await.unwrap().is_none());
        assert!(cached_repo.find_by_id(id).await.unwrap().is_none());

        assert_eq!(repo.find_calls(), 2);
        assert!(!cache.contains("peanuts::99").await);
    }

    #[tokio::test]
    async fn test_store_errors_propagate_unmodified() {
        let repo = Arc::new(MockCharacterRepository::new());
        let cache = Arc::new(MockCache::new());
        let cached_repo = cached(&repo, &cache);
        repo.unavailable.store(true, Ordering::SeqCst);

        let find = cached_repo.find_by_id(CharacterId::new(1)).await;
        let save = cached_repo.save(Character::new("Pigpen", None)).await;

        let expected = RepositoryError::ConnectionFailed("connection refused".to_string());
        assert_eq!(find, Err(expected.clone()));
        assert_eq!(save, Err(expected));
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_treated_as_miss() {
        let repo = Arc::new(MockCharacterRepository::new());
        let cache = Arc::new(MockCache::new());
        let stored = repo.save(Character::new("Sally", None)).await.unwrap();
        cache
            .set("peanuts::1", b"not json", None)
            .await
            .unwrap();
        let cached_repo = cached(&repo, &cache);

        let found = cached_repo.find_by_id(CharacterId::new(1)).await.unwrap();
        assert_eq!(found, Some(stored.clone()));
        assert_eq!(repo.find_calls(), 1);

        // The bad entry was overwritten.
        let again = cached_repo.find_by_id(CharacterId::new(1)).await.unwrap();
        assert_eq!(again, Some(stored));
        assert_eq!(repo.find_calls(), 1);
    }

    #[tokio::test]
    async fn test_custom_key_prefix() {
        let repo = Arc::new(MockCharacterRepository::new());
        let cache = Arc::new(MockCache::new());
        let cached_repo = cached(&repo, &cache).with_key_prefix("staging");

        cached_repo
            .save(Character::new("Marcie", None))
            .await
            .unwrap();

        assert!(cache.contains("staging::1").await);
        assert!(!cache.contains("peanuts::1").await);
    }

    #[tokio::test]
    async fn test_delete_all_clears_store_and_cache() {
        let repo = Arc::new(MockCharacterRepository::new());
        let cache = Arc::new(MockCache::new());
        cache.set("other::1", b"keep", None).await.unwrap();
        let cached_repo = cached(&repo, &cache);

        let saved = cached_repo
            .save(Character::new("Franklin", None))
            .await
            .unwrap();
        cached_repo.delete_all().await.unwrap();

        assert_eq!(cached_repo.count().await.unwrap(), 0);
        assert!(cached_repo
            .find_by_id(saved.id().unwrap())
            .await
            .unwrap()
            .is_none());
        assert!(cache.contains("other::1").await);
    }

    #[tokio::test]
    async fn test_degrade_mode_falls_back_to_store() {
        let repo = Arc::new(MockCharacterRepository::new());
        let cached_repo = CachedCharacterRepository::new(repo.clone(), Arc::new(FailingCache));

        let saved = cached_repo
            .save(Character::new("Peppermint Patty", None))
            .await
            .unwrap();
        let found = cached_repo.find_by_id(saved.id().unwrap()).await.unwrap();

        assert_eq!(found, Some(saved));
        assert_eq!(repo.find_calls(), 1);
        cached_repo.delete_all().await.unwrap();
    }

    #[tokio::test]
    async fn test_fail_mode_surfaces_cache_errors() {
        let repo = Arc::new(MockCharacterRepository::new());
        let cached_repo = CachedCharacterRepository::new(repo.clone(), Arc::new(FailingCache))
            .with_failure_mode(CacheFailureMode::Fail);

        let find = cached_repo.find_by_id(CharacterId::new(1)).await;
        assert!(matches!(find, Err(RepositoryError::Cache(_))));
        assert_eq!(repo.find_calls(), 0);

        let save = cached_repo.save(Character::new("Rerun", None)).await;
        assert!(matches!(save, Err(RepositoryError::Cache(_))));

        let delete = cached_repo.delete_all().await;
        assert!(matches!(delete, Err(RepositoryError::Cache(_))));
    }

    #[tokio::test]
    async fn test_ttl_is_passed_to_cache() {
        let repo = Arc::new(MockCharacterRepository::new());
        let cache = Arc::new(MockCache::new());
        let cached_repo = cached(&repo, &cache).with_ttl(Some(Duration::from_secs(600)));

        let saved = cached_repo
            .save(Character::new("Schroeder", None))
            .await
            .unwrap();
        cache.delete("peanuts::1").await.unwrap();
        cached_repo.find_by_id(saved.id().unwrap()).await.unwrap();

        assert_eq!(
            cache.recorded_ttls().await,
            vec![Some(Duration::from_secs(600)), Some(Duration::from_secs(600))]
        );
    }

    #[tokio::test]
    async fn test_default_ttl_never_expires() {
        let repo = Arc::new(MockCharacterRepository::new());
        let cache = Arc::new(MockCache::new());
        let cached_repo = cached(&repo, &cache);

        cached_repo
            .save(Character::new("Violet", None))
            .await
            .unwrap();

        assert_eq!(cache.recorded_ttls().await, vec![None]);
    }

    #[tokio::test]
    async fn test_failed_overwrite_drops_cached_entry() {
        let repo = Arc::new(MockCharacterRepository::new());
        let cache = Arc::new(MockCache::new());
        let cached_repo = cached(&repo, &cache);

        let saved = cached_repo
            .save(Character::new("Lucy", None))
            .await
            .unwrap();
        let id = saved.id().unwrap();

        cache.fail_writes(true, false);
        let mut updated = saved.clone();
        updated.description = Some("Fussbudget".to_string());
        cached_repo.save(updated.clone()).await.unwrap();

        assert!(!cache.contains("peanuts::1").await);
        let found = cached_repo.find_by_id(id).await.unwrap();
        assert_eq!(found, Some(updated));
        assert_eq!(repo.find_calls(), 1);
    }

    #[tokio::test]
    async fn test_read_only_cache_never_serves_stale_value() {
        let repo = Arc::new(MockCharacterRepository::new());
        let cache = Arc::new(MockCache::new());
        let cached_repo = cached(&repo, &cache);

        let saved = cached_repo
            .save(Character::new("Lucy", None))
            .await
            .unwrap();
        let id = saved.id().unwrap();

        cache.fail_writes(true, true);
        let mut updated = saved.clone();
        updated.description = Some("Fussbudget".to_string());
        cached_repo.save(updated.clone()).await.unwrap();

        // The old entry is still in the backend but must not be returned.
        assert!(cache.contains("peanuts::1").await);
        assert_eq!(cached_repo.find_by_id(id).await.unwrap(), Some(updated.clone()));
        assert_eq!(cached_repo.find_by_id(id).await.unwrap(), Some(updated.clone()));
        assert_eq!(repo.find_calls(), 2);

        // Once writes work again the next read repopulates the cache.
        cache.fail_writes(false, false);
        assert_eq!(cached_repo.find_by_id(id).await.unwrap(), Some(updated.clone()));
        assert_eq!(cached_repo.find_by_id(id).await.unwrap(), Some(updated));
        assert_eq!(repo.find_calls(), 3);
    }

    #[tokio::test]
    async fn test_read_only_cache_in_fail_mode_errors_and_bypasses() {
        let repo = Arc::new(MockCharacterRepository::new());
        let cache = Arc::new(MockCache::new());
        let cached_repo = cached(&repo, &cache).with_failure_mode(CacheFailureMode::Fail);

        let saved = cached_repo
            .save(Character::new("Linus", None))
            .await
            .unwrap();
        let id = saved.id().unwrap();

        cache.fail_writes(true, true);
        let mut updated = saved.clone();
        updated.description = Some("Blanket".to_string());
        let result = cached_repo.save(updated.clone()).await;
        assert!(matches!(result, Err(RepositoryError::Cache(_))));

        // The store write landed; reads fail rather than return the old entry.
        assert!(matches!(
            cached_repo.find_by_id(id).await,
            Err(RepositoryError::Cache(_))
        ));
        assert_eq!(repo.characters.read().await.get(&id), Some(&updated));
    }
}
