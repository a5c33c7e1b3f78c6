//! Service status handlers

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, response::Json};
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "OK" while the server is answering
    pub status: String,
}

/// Seed size response
#[derive(Debug, Serialize)]
pub struct CountResponse {
    /// Number of songs in the seed dataset
    pub length: usize,
}

/// GET /health - Liveness check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
    })
}

/// GET /count - Number of songs the collection was seeded with
///
/// Reports the seed size, not the live collection size.
pub async fn count(State(state): State<AppState>) -> Result<Json<CountResponse>, AppError> {
    let length = state.seed_len().ok_or(AppError::SeedUnavailable)?;
    Ok(Json(CountResponse { length }))
}
