mod error;
mod operations;
mod requests;
mod types;

pub use error::CharacterError;
pub use operations::{validate_character, validate_name, MAX_NAME_LENGTH};
pub use requests::CreateCharacterRequest;
pub use types::{Character, CharacterId};
