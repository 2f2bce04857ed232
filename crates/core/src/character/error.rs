use thiserror::Error;

use super::CharacterId;

/// Errors that can occur when validating or persisting characters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CharacterError {
    #[error("Name is required")]
    MissingName,
    #[error("Name cannot be blank")]
    EmptyName,
    #[error("Name must be between 1 and 100 characters")]
    NameTooLong,
    #[error("Character already has id {existing}, cannot reassign to {requested}")]
    IdAlreadyAssigned {
        existing: CharacterId,
        requested: CharacterId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_error_display() {
        assert_eq!(CharacterError::MissingName.to_string(), "Name is required");
        assert_eq!(
            CharacterError::NameTooLong.to_string(),
            "Name must be between 1 and 100 characters"
        );
    }

    #[test]
    fn test_id_already_assigned_display() {
        let error = CharacterError::IdAlreadyAssigned {
            existing: CharacterId::new(1),
            requested: CharacterId::new(2),
        };
        assert_eq!(
            error.to_string(),
            "Character already has id 1, cannot reassign to 2"
        );
    }
}
