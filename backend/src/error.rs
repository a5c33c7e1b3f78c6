//! Error types and error handling for the application
//!
//! This module defines custom error types that can be converted to HTTP responses.
//! All errors implement `IntoResponse`; the body is always a JSON object with a
//! single message field.

use crate::store::{SongId, StoreError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Request body is missing, not JSON, or not a usable song object
    #[error("{0}")]
    InvalidBody(String),

    /// No song matched; carries the message returned to the client
    #[error("{0}")]
    NotFound(&'static str),

    /// A song with this id already exists
    #[error("song with id {0} already present")]
    AlreadyPresent(SongId),

    /// The seed dataset was never loaded
    #[error("Internal server error")]
    SeedUnavailable,

    /// The song store failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::InvalidBody(_) => (
                StatusCode::BAD_REQUEST,
                json!({ "message": self.to_string() }),
            ),
            AppError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                json!({ "message": self.to_string() }),
            ),
            // Duplicate creates answer 302 with a capitalised `Message` key.
            AppError::AlreadyPresent(_) => (
                StatusCode::FOUND,
                json!({ "Message": self.to_string() }),
            ),
            AppError::SeedUnavailable => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "message": self.to_string() }),
            ),
            AppError::Store(err) => {
                tracing::error!("Store operation failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": self.to_string() }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
