//! Song storage
//!
//! The `SongStore` trait is the seam between HTTP handlers and the document
//! store. Songs are schema-less JSON objects identified by their integer `id`
//! field; the store assigns its own key (`_id`) on insert.

pub mod memory;
pub mod mongo;

pub use memory::MemorySongStore;
pub use mongo::MongoSongStore;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// A song document: arbitrary fields keyed by name
pub type Song = Map<String, Value>;

/// Application-level song identifier (the `id` field, not the store key)
pub type SongId = i64;

/// Name of the field holding the application-level identifier
pub const ID_FIELD: &str = "id";

/// Name of the field holding the store-generated key
pub const KEY_FIELD: &str = "_id";

/// Error types for storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// The MongoDB driver reported a failure
    #[error("Database error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// A song could not be converted to a BSON document
    #[error("Invalid document: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),
}

/// Result alias for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Result of merging fields into an existing song
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// No song carries the requested id
    NotFound,
    /// The song exists but every field already had the submitted value
    Unchanged,
    /// At least one field changed; holds the song as stored after the update
    Updated(Song),
}

/// Storage backend for song documents
#[async_trait]
pub trait SongStore: Send + Sync {
    /// Drop every stored song and insert `seed` in its place
    async fn reset(&self, seed: &[Song]) -> StoreResult<()>;

    /// All stored songs
    async fn list(&self) -> StoreResult<Vec<Song>>;

    /// The song whose `id` field equals `id`
    async fn find(&self, id: SongId) -> StoreResult<Option<Song>>;

    /// Insert a new song, returning the store-generated key
    async fn insert(&self, song: Song) -> StoreResult<Value>;

    /// Overwrite the given fields of the song with `id`, leaving others untouched
    async fn update(&self, id: SongId, fields: Song) -> StoreResult<UpdateOutcome>;

    /// Remove the song with `id`; returns whether anything was removed
    async fn delete(&self, id: SongId) -> StoreResult<bool>;
}

/// Read the integer `id` field of a song, if present
pub fn song_id(song: &Song) -> Option<SongId> {
    song.get(ID_FIELD).and_then(Value::as_i64)
}
