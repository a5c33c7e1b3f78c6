// Application state management
// Holds the song store handle shared by every request handler

use crate::state::SeedData;
use crate::store::{SongStore, StoreResult};
use std::sync::Arc;
use tracing::info;

/// Main application state
///
/// Cloned into each handler by axum; clones share the same store.
#[derive(Clone)]
pub struct AppState {
    /// Store holding the song collection
    pub store: Arc<dyn SongStore>,
    /// Number of songs in the seed dataset, once seeding has happened
    seed_len: Option<usize>,
}

impl AppState {
    /// Create state around a store that has not been seeded
    pub fn new(store: Arc<dyn SongStore>) -> Self {
        Self {
            store,
            seed_len: None,
        }
    }

    /// Replace the store contents with the seed dataset
    ///
    /// # Arguments
    /// * `store` - Store to seed
    /// * `seed` - Songs loaded from the seed file
    ///
    /// # Returns
    /// * `Ok(AppState)` with the seed size recorded
    /// * `Err(StoreError)` if the store could not be reset
    pub async fn bootstrap(store: Arc<dyn SongStore>, seed: &SeedData) -> StoreResult<Self> {
        store.reset(&seed.songs).await?;
        info!("Song collection reset with {} seed songs", seed.len());
        Ok(Self {
            store,
            seed_len: Some(seed.len()),
        })
    }

    /// Size of the seed dataset, independent of later creates and deletes
    pub fn seed_len(&self) -> Option<usize> {
        self.seed_len
    }
}
