//! API utility functions
//!
//! Contains helpers used by the song handlers to validate path ids and
//! request bodies.

use crate::error::AppError;
use crate::store::{song_id, Song, SongId, KEY_FIELD};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path,
    },
    Json,
};
use serde_json::Value;

/// Message returned when a body is absent or not a JSON object
pub const BODY_MUST_BE_JSON: &str = "Request body must be JSON";

/// Validate a JSON request body
///
/// # Arguments
/// * `payload` - Extracted body, or the rejection axum produced
///
/// # Returns
/// * `Ok(Song)` - Body is a non-empty JSON object
/// * `Err(AppError)` - Body is missing, malformed, empty, or not an object
pub fn require_json_object(payload: Result<Json<Value>, JsonRejection>) -> Result<Song, AppError> {
    match payload {
        Ok(Json(Value::Object(fields))) if !fields.is_empty() => Ok(fields),
        Ok(_) => Err(AppError::InvalidBody(BODY_MUST_BE_JSON.to_string())),
        Err(rejection) => {
            tracing::debug!("Rejected request body: {}", rejection.body_text());
            Err(AppError::InvalidBody(BODY_MUST_BE_JSON.to_string()))
        }
    }
}

/// Resolve the integer song id from the request path
///
/// A segment that is not an `i64` matches no song, so it answers 404 with
/// `not_found` rather than axum's plain-text 400.
pub fn require_path_id(
    path: Result<Path<SongId>, PathRejection>,
    not_found: &'static str,
) -> Result<SongId, AppError> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            tracing::debug!("Rejected song path: {}", rejection.body_text());
            Err(AppError::NotFound(not_found))
        }
    }
}

/// Extract the integer `id` a new song must carry
pub fn require_song_id(song: &Song) -> Result<SongId, AppError> {
    song_id(song)
        .ok_or_else(|| AppError::InvalidBody("Song must include an integer id".to_string()))
}

/// Remove fields that an update must not touch
///
/// The store key is immutable once assigned.
pub fn strip_immutable_fields(mut fields: Song) -> Song {
    fields.remove(KEY_FIELD);
    fields
}
