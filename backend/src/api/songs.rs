//! Song API handlers
//!
//! Contains HTTP request handlers for song CRUD operations. Songs are passed
//! through as JSON objects; only the integer `id` field is interpreted.

use crate::api::utils::{
    require_json_object, require_path_id, require_song_id, strip_immutable_fields,
};
use crate::error::AppError;
use crate::state::AppState;
use crate::store::{Song, SongId, UpdateOutcome};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

/// Not-found message for lookups by id
const SONG_WITH_ID_NOT_FOUND: &str = "song with id not found";

/// Not-found message for updates and deletes
const SONG_NOT_FOUND: &str = "song not found";

/// Songs list response
#[derive(Debug, Serialize)]
pub struct SongsListResponse {
    /// Every song in the collection
    pub songs: Vec<Song>,
}

/// Message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message
    pub message: String,
}

/// GET /song - List all songs
pub async fn list_songs(
    State(state): State<AppState>,
) -> Result<Json<SongsListResponse>, AppError> {
    let songs = state.store.list().await?;
    Ok(Json(SongsListResponse { songs }))
}

/// GET /song/:id - Get a specific song
pub async fn get_song(
    State(state): State<AppState>,
    path: Result<Path<SongId>, PathRejection>,
) -> Result<Json<Song>, AppError> {
    let id = require_path_id(path, SONG_WITH_ID_NOT_FOUND)?;
    let song = state
        .store
        .find(id)
        .await?
        .ok_or(AppError::NotFound(SONG_WITH_ID_NOT_FOUND))?;

    Ok(Json(song))
}

/// POST /song - Create a new song
///
/// Answers 302 when the id is taken, leaving the existing song untouched.
pub async fn create_song(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let song = require_json_object(payload)?;
    let id = require_song_id(&song)?;

    if state.store.find(id).await?.is_some() {
        return Err(AppError::AlreadyPresent(id));
    }

    let key = state.store.insert(song).await?;
    info!(id, "Created song");

    Ok((StatusCode::CREATED, Json(json!({ "inserted id": key }))))
}

/// PUT /song/:id - Merge fields into a song
///
/// Returns 201 with the updated song when something changed, 200 otherwise.
pub async fn update_song(
    State(state): State<AppState>,
    path: Result<Path<SongId>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let id = require_path_id(path, SONG_NOT_FOUND)?;
    let fields = strip_immutable_fields(require_json_object(payload)?);

    match state.store.update(id, fields).await? {
        UpdateOutcome::NotFound => Err(AppError::NotFound(SONG_NOT_FOUND)),
        UpdateOutcome::Unchanged => Ok((
            StatusCode::OK,
            Json(MessageResponse {
                message: "song found, but nothing updated".to_string(),
            }),
        )
            .into_response()),
        UpdateOutcome::Updated(song) => {
            info!(id, "Updated song");
            Ok((StatusCode::CREATED, Json(song)).into_response())
        }
    }
}

/// DELETE /song/:id - Delete a song
pub async fn delete_song(
    State(state): State<AppState>,
    path: Result<Path<SongId>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = require_path_id(path, SONG_NOT_FOUND)?;
    if !state.store.delete(id).await? {
        return Err(AppError::NotFound(SONG_NOT_FOUND));
    }

    info!(id, "Deleted song");
    Ok(StatusCode::NO_CONTENT)
}
