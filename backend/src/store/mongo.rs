//! MongoDB song store
//!
//! Songs live in the `songs` collection of the `songs` database. Documents
//! leave the store as relaxed extended JSON, so an ObjectId key renders as
//! `{"$oid": "<hex>"}`.

use super::{Song, SongId, SongStore, StoreResult, UpdateOutcome, KEY_FIELD};
use crate::config::MongoConfig;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::{Client, Collection};
use serde_json::{Map, Value};
use tracing::{debug, info};

/// Database holding the song collection
pub const DATABASE_NAME: &str = "songs";

/// Collection holding song documents
pub const COLLECTION_NAME: &str = "songs";

/// Song store backed by a MongoDB collection
#[derive(Clone)]
pub struct MongoSongStore {
    collection: Collection<Document>,
}

impl MongoSongStore {
    /// Connect to MongoDB and verify the connection
    ///
    /// # Arguments
    /// * `config` - Connection settings
    ///
    /// # Returns
    /// * `Ok(MongoSongStore)` if the server answered a ping
    /// * `Err(StoreError)` if connecting or authenticating failed
    pub async fn connect(config: &MongoConfig) -> StoreResult<Self> {
        Self::connect_to_database(config, DATABASE_NAME).await
    }

    /// Connect like [`MongoSongStore::connect`], using the named database
    pub async fn connect_to_database(
        config: &MongoConfig,
        database_name: &str,
    ) -> StoreResult<Self> {
        info!(
            host = %config.host(),
            database = database_name,
            authenticated = config.is_authenticated(),
            "Connecting to MongoDB"
        );

        let client = Client::with_uri_str(config.connection_uri()).await?;
        let database = client.database(database_name);

        // The driver connects lazily; a ping surfaces unreachable hosts and bad credentials now.
        database.run_command(doc! { "ping": 1 }).await?;
        info!("Connected to MongoDB at {}", config.host());

        Ok(Self {
            collection: database.collection(COLLECTION_NAME),
        })
    }

    fn id_filter(id: SongId) -> Document {
        doc! { "id": id }
    }
}

fn to_document(song: &Song) -> StoreResult<Document> {
    Ok(mongodb::bson::to_document(song)?)
}

fn to_song(document: Document) -> Song {
    match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(song) => song,
        _ => Map::new(),
    }
}

#[async_trait]
impl SongStore for MongoSongStore {
    async fn reset(&self, seed: &[Song]) -> StoreResult<()> {
        self.collection.drop().await?;

        let documents = seed.iter().map(to_document).collect::<StoreResult<Vec<_>>>()?;
        if !documents.is_empty() {
            let result = self.collection.insert_many(documents).await?;
            info!("Seeded {} songs", result.inserted_ids.len());
        }
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<Song>> {
        let cursor = self.collection.find(doc! {}).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(to_song).collect())
    }

    async fn find(&self, id: SongId) -> StoreResult<Option<Song>> {
        let document = self.collection.find_one(Self::id_filter(id)).await?;
        Ok(document.map(to_song))
    }

    async fn insert(&self, song: Song) -> StoreResult<Value> {
        let result = self.collection.insert_one(to_document(&song)?).await?;
        debug!("Inserted song with key {}", result.inserted_id);
        Ok(result.inserted_id.into_relaxed_extjson())
    }

    async fn update(&self, id: SongId, fields: Song) -> StoreResult<UpdateOutcome> {
        let Some(existing) = self.collection.find_one(Self::id_filter(id)).await? else {
            return Ok(UpdateOutcome::NotFound);
        };
        // An empty $set is rejected by the server.
        if fields.is_empty() {
            return Ok(UpdateOutcome::Unchanged);
        }

        // Target the store key so a body that rewrites `id` still finds the song afterwards.
        let key_filter = match existing.get(KEY_FIELD) {
            Some(key) => doc! { "_id": key.clone() },
            None => Self::id_filter(id),
        };

        let update = doc! { "$set": to_document(&fields)? };
        let result = self
            .collection
            .update_one(key_filter.clone(), update)
            .await?;
        debug!(
            id,
            matched = result.matched_count,
            modified = result.modified_count,
            "Applied song update"
        );

        if result.matched_count == 0 {
            return Ok(UpdateOutcome::NotFound);
        }
        if result.modified_count == 0 {
            return Ok(UpdateOutcome::Unchanged);
        }

        Ok(match self.collection.find_one(key_filter).await? {
            Some(document) => UpdateOutcome::Updated(to_song(document)),
            None => UpdateOutcome::NotFound,
        })
    }

    async fn delete(&self, id: SongId) -> StoreResult<bool> {
        let result = self.collection.delete_one(Self::id_filter(id)).await?;
        Ok(result.deleted_count > 0)
    }
}
