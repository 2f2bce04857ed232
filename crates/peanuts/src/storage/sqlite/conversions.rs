//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.

use peanuts_core::character::{Character, CharacterId};
use rusqlite::Row;

/// Convert a SQLite row to a persisted Character.
///
/// Expected columns: id, name, description
pub fn row_to_character(row: &Row) -> rusqlite::Result<Character> {
    let id: i64 = row.get(0)?;
    let name: String = row.get(1)?;
    let description: Option<String> = row.get(2)?;

    persisted(id, name, description)
}

/// Builds a persisted character from its stored columns.
pub fn persisted(
    id: i64,
    name: String,
    description: Option<String>,
) -> rusqlite::Result<Character> {
    Character::new(name, description)
        .into_persisted(CharacterId::new(id))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Integer, Box::new(e))
        })
}
