//! API module
//!
//! Contains HTTP request handlers and the route table for the song service

pub mod songs;
pub mod system;
pub mod utils;

use crate::state::AppState;
use axum::{routing::get, Router};

/// Build the application routes around the given state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/count", get(system::count))
        .route("/song", get(songs::list_songs).post(songs::create_song))
        .route(
            "/song/:id",
            get(songs::get_song)
                .put(songs::update_song)
                .delete(songs::delete_song),
        )
        .with_state(state)
}
