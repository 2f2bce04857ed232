//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O.

/// SQL statement to create all tables.
///
/// `AUTOINCREMENT` makes SQLite track the highest id ever issued, so ids of
/// deleted rows are never handed out again.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS characters (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT
);
"#;

pub const INSERT_CHARACTER: &str = r#"
INSERT INTO characters (name, description)
VALUES (?1, ?2)
"#;

pub const UPSERT_CHARACTER: &str = r#"
INSERT INTO characters (id, name, description)
VALUES (?1, ?2, ?3)
ON CONFLICT(id) DO UPDATE SET
    name = excluded.name,
    description = excluded.description
"#;

pub const SELECT_CHARACTER_BY_ID: &str = r#"
SELECT id, name, description
FROM characters
WHERE id = ?1
"#;

pub const DELETE_ALL_CHARACTERS: &str = "DELETE FROM characters";

pub const COUNT_CHARACTERS: &str = "SELECT COUNT(*) FROM characters";
