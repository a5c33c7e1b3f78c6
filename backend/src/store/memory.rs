//! In-process song store
//!
//! Keeps songs in a `Vec` behind a `RwLock`. Keys are generated as
//! ObjectId hex strings so responses have the same shape as with MongoDB.

use super::{song_id, Song, SongId, SongStore, StoreResult, UpdateOutcome, KEY_FIELD};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tracing::debug;

/// Song store held entirely in memory
#[derive(Debug, Default)]
pub struct MemorySongStore {
    songs: RwLock<Vec<Song>>,
}

impl MemorySongStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn generate_key() -> Value {
        json!({ "$oid": ObjectId::new().to_hex() })
    }

    fn with_key(mut song: Song) -> (Song, Value) {
        let key = song
            .get(KEY_FIELD)
            .cloned()
            .unwrap_or_else(Self::generate_key);
        song.insert(KEY_FIELD.to_string(), key.clone());
        (song, key)
    }
}

#[async_trait]
impl SongStore for MemorySongStore {
    async fn reset(&self, seed: &[Song]) -> StoreResult<()> {
        let mut songs = self.songs.write().await;
        *songs = seed
            .iter()
            .cloned()
            .map(|song| Self::with_key(song).0)
            .collect();
        debug!("Memory store reset with {} songs", songs.len());
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<Song>> {
        Ok(self.songs.read().await.clone())
    }

    async fn find(&self, id: SongId) -> StoreResult<Option<Song>> {
        let songs = self.songs.read().await;
        Ok(songs.iter().find(|s| song_id(s) == Some(id)).cloned())
    }

    async fn insert(&self, song: Song) -> StoreResult<Value> {
        let (song, key) = Self::with_key(song);
        self.songs.write().await.push(song);
        Ok(key)
    }

    async fn update(&self, id: SongId, fields: Song) -> StoreResult<UpdateOutcome> {
        let mut songs = self.songs.write().await;
        let Some(song) = songs.iter_mut().find(|s| song_id(s) == Some(id)) else {
            return Ok(UpdateOutcome::NotFound);
        };

        let mut changed = false;
        for (field, value) in fields {
            if song.get(&field) != Some(&value) {
                song.insert(field, value);
                changed = true;
            }
        }

        if changed {
            Ok(UpdateOutcome::Updated(song.clone()))
        } else {
            Ok(UpdateOutcome::Unchanged)
        }
    }

    async fn delete(&self, id: SongId) -> StoreResult<bool> {
        let mut songs = self.songs.write().await;
        match songs.iter().position(|s| song_id(s) == Some(id)) {
            Some(index) => {
                songs.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
