//! Song Service Library
//!
//! This library exposes modules for testing and external use.
//! The main binary is in `src/main.rs`.

pub mod api;
pub mod config;
pub mod error;
/// Application state management
///
/// Holds the shared store handle and loads the seed dataset.
pub mod state;
pub mod store;
