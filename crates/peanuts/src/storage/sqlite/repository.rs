//! SQLite repository implementation.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use peanuts_core::character::{validate_character, Character, CharacterId};
use peanuts_core::storage::{CharacterRepository, RepositoryError, Result};

use super::conversions::{persisted, row_to_character};
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository implementation.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(map_tokio_rusqlite_error)
    }
}

#[async_trait]
impl CharacterRepository for SqliteRepository {
    async fn find_by_id(&self, id: CharacterId) -> Result<Option<Character>> {
        let id = id.get();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_CHARACTER_BY_ID)
                    .map_err(wrap_err)?;
                let result = stmt.query_row([id], row_to_character);
                match result {
                    Ok(character) => Ok(Some(character)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn save(&self, character: Character) -> Result<Character> {
        validate_character(&character).map_err(|e| RepositoryError::InvalidData(e.to_string()))?;

        let id = character.id().map(CharacterId::get);
        let name = character.name;
        let description = character.description;

        self.conn
            .call(move |conn| {
                let id = match id {
                    Some(id) => {
                        conn.execute(
                            schema::UPSERT_CHARACTER,
                            rusqlite::params![id, name, description],
                        )
                        .map_err(wrap_err)?;
                        id
                    }
                    None => {
                        conn.execute(
                            schema::INSERT_CHARACTER,
                            rusqlite::params![name, description],
                        )
                        .map_err(wrap_err)?;
                        conn.last_insert_rowid()
                    }
                };
                persisted(id, name, description).map_err(wrap_err)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn delete_all(&self) -> Result<()> {
        self.conn
            .call(|conn| {
                conn.execute(schema::DELETE_ALL_CHARACTERS, [])
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn count(&self) -> Result<u64> {
        self.conn
            .call(|conn| {
                let count: i64 = conn
                    .query_row(schema::COUNT_CHARACTERS, [], |row| row.get(0))
                    .map_err(wrap_err)?;
                Ok(count as u64)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn repo() -> SqliteRepository {
        SqliteRepository::new_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_save_assigns_id_and_finds_it() {
        let repo = repo().await;

        let saved = repo
            .save(Character::new(
                "Charlie Brown",
                Some("The main character".to_string()),
            ))
            .await
            .unwrap();
        let id = saved.id().expect("id should be assigned");

        let found = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found, saved);
    }

    #[tokio::test]
    async fn test_save_rejects_overlong_name() {
        let repo = repo().await;

        let result = repo.save(Character::new("a".repeat(101), None)).await;

        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let repo = repo().await;
        assert!(repo
            .find_by_id(CharacterId::new(404))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_save_existing_overwrites() {
        let repo = repo().await;
        let saved = repo
            .save(Character::new("Schroeder", Some("Plays piano".to_string())))
            .await
            .unwrap();

        let mut updated = saved.clone();
        updated.description = Some("Beethoven enthusiast".to_string());
        let result = repo.save(updated).await.unwrap();

        assert_eq!(result.id(), saved.id());
        assert_eq!(repo.count().await.unwrap(), 1);
        let found = repo.find_by_id(saved.id().unwrap()).await.unwrap().unwrap();
        assert_eq!(found.description.as_deref(), Some("Beethoven enthusiast"));
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete_all() {
        let repo = repo().await;
        let first = repo.save(Character::new("Lucy", None)).await.unwrap();

        repo.delete_all().await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);

        let second = repo.save(Character::new("Linus", None)).await.unwrap();
        assert!(second.id().unwrap() > first.id().unwrap());
    }

    #[tokio::test]
    async fn test_count() {
        let repo = repo().await;
        for name in ["Snoopy", "Woodstock", "Pigpen"] {
            repo.save(Character::new(name, None)).await.unwrap();
        }
        assert_eq!(repo.count().await.unwrap(), 3);
    }
}
