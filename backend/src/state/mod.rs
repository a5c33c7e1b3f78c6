// State management module
// Handles application state and the seed dataset loaded at startup

pub mod app_state;
pub mod persistence;

pub use app_state::AppState;
pub use persistence::{SeedData, SeedError};
