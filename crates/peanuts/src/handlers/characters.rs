//! Character handlers.
//!
//! Both go through the cached repository held in the application state.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use peanuts_core::character::{CharacterId, CreateCharacterRequest};

use crate::{
    handlers::{error_response, AppError},
    state::AppState,
};

/// GET /peanuts/{id} - The character as JSON, or an empty 200 when absent.
pub async fn get_character(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(id) = match path {
        Ok(path) => path,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Invalid character id");
            return Ok(error_response(StatusCode::BAD_REQUEST, rejection.body_text()));
        }
    };

    tracing::info!(character_id = id, "Get Peanuts character by id");

    match state.characters.find_by_id(CharacterId::new(id)).await? {
        Some(character) => Ok(Json(character).into_response()),
        None => Ok(StatusCode::OK.into_response()),
    }
}

/// POST /peanuts - Validates and stores a new character.
pub async fn create_character(
    State(state): State<AppState>,
    payload: Result<Json<CreateCharacterRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Malformed character payload");
            return Ok(error_response(StatusCode::BAD_REQUEST, rejection.body_text()));
        }
    };

    let character = match request.into_character() {
        Ok(character) => character,
        Err(err) => {
            tracing::warn!(error = %err, "Character validation failed");
            return Ok(error_response(StatusCode::BAD_REQUEST, err.to_string()));
        }
    };

    tracing::info!(name = %character.name, "Create Peanuts character");
    let saved = state.characters.save(character).await?;

    Ok(Json(saved).into_response())
}
