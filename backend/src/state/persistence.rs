// Seed dataset loading
// Reads the bundled JSON array of songs that replaces the collection at startup

use crate::store::Song;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error types for seed loading
#[derive(Error, Debug)]
pub enum SeedError {
    /// File I/O error
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        /// Path that could not be read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
    /// JSON deserialization error
    #[error("Seed file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Invalid data format
    #[error("Invalid seed data: {0}")]
    InvalidData(String),
}

/// Songs read from the seed file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedData {
    /// Songs in file order
    pub songs: Vec<Song>,
}

impl SeedData {
    /// Load the seed dataset from a JSON file
    ///
    /// # Arguments
    /// * `path` - Path to the JSON file
    ///
    /// # Returns
    /// * `Ok(SeedData)` if the file holds an array of objects
    /// * `Err(SeedError)` if the file is missing or malformed
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SeedError> {
        let json = fs::read_to_string(path.as_ref()).map_err(|source| SeedError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Parse the seed dataset from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Array(items) = value else {
            return Err(SeedError::InvalidData(
                "expected a JSON array of songs".to_string(),
            ));
        };

        let songs = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(song) => Ok(song),
                other => Err(SeedError::InvalidData(format!(
                    "entry {} is not an object: {}",
                    index, other
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { songs })
    }

    /// Number of songs in the dataset
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Whether the dataset holds no songs
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}
