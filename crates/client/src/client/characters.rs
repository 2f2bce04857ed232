//! Character operations.

use peanuts_core::character::{Character, CreateCharacterRequest};

use super::{server_error, PeanutsClient};
use crate::error::{ClientError, Result};

impl PeanutsClient {
    /// Get a character by ID. The server answers an empty 200 for unknown ids.
    pub async fn get_character(&self, id: i64) -> Result<Option<Character>> {
        let response = self
            .client
            .get(self.url(&format!("/peanuts/{}", id)))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(server_error(response).await);
        }

        let body = response.bytes().await?;
        if body.is_empty() {
            return Ok(None);
        }
        serde_json::from_slice(&body)
            .map(Some)
            .map_err(ClientError::from)
    }

    /// Create a new character.
    pub async fn create_character(&self, request: &CreateCharacterRequest) -> Result<Character> {
        let response = self
            .client
            .post(self.url("/peanuts"))
            .json(request)
            .send()
            .await?;
        self.handle_response(response).await
    }
}
