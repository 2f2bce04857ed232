use super::error::CharacterError;
use super::types::Character;

/// Maximum number of characters allowed in a character name.
pub const MAX_NAME_LENGTH: usize = 100;

/// Validates a character name.
///
/// Blank names (empty or whitespace only) are rejected, as are names longer
/// than [`MAX_NAME_LENGTH`] characters.
pub fn validate_name(name: &str) -> Result<(), CharacterError> {
    if name.trim().is_empty() {
        return Err(CharacterError::EmptyName);
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(CharacterError::NameTooLong);
    }
    Ok(())
}

/// Validates a character before it is saved. Repositories call this so the
/// upsert path cannot bypass the name rules.
pub fn validate_character(character: &Character) -> Result<(), CharacterError> {
    validate_name(&character.name)
}
