//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults. The document store host is the only required value.

use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Bundled seed dataset, relative to the crate root.
pub const DEFAULT_SEED_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/songs.json");

/// Errors raised while loading configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is not set
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    /// An environment variable is set but cannot be parsed
    #[error("Invalid value for {name}: {value:?}")]
    Invalid {
        /// Variable name
        name: &'static str,
        /// Raw value found in the environment
        value: String,
    },
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Document store connection settings
    pub mongo: MongoConfig,
    /// Seed dataset settings
    pub seed: SeedConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Document store connection settings
#[derive(Clone)]
pub struct MongoConfig {
    /// Host (optionally `host:port`) of the MongoDB service
    pub service: String,
    /// Username, used only together with `password`
    pub username: Option<String>,
    /// Password, used only together with `username`
    pub password: Option<String>,
    /// Port appended to `service` when it does not name one itself
    pub port: Option<u16>,
}

/// Seed dataset settings
#[derive(Debug, Clone)]
pub struct SeedConfig {
    /// Path of the JSON array loaded at startup
    pub path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let service = lookup("MONGODB_SERVICE")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("MONGODB_SERVICE"))?;

        let port = match lookup("MONGODB_PORT").filter(|p| !p.trim().is_empty()) {
            Some(raw) => Some(raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "MONGODB_PORT",
                value: raw,
            })?),
            None => None,
        };

        Ok(Self {
            server: ServerConfig {
                port: lookup("PORT")
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
                host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            },
            mongo: MongoConfig {
                service,
                username: lookup("MONGODB_USERNAME").filter(|u| !u.is_empty()),
                password: lookup("MONGODB_PASSWORD").filter(|p| !p.is_empty()),
                port,
            },
            seed: SeedConfig {
                path: lookup("SONGS_DATA_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_SEED_PATH)),
            },
        })
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl MongoConfig {
    /// Host part of the connection string, with `MONGODB_PORT` applied
    pub fn host(&self) -> String {
        match self.port {
            Some(port) if !self.service.contains(':') => format!("{}:{}", self.service, port),
            _ => self.service.clone(),
        }
    }

    /// Build the `mongodb://` connection string.
    ///
    /// Credentials are only included when both username and password are set.
    pub fn connection_uri(&self) -> String {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => format!(
                "mongodb://{}:{}@{}",
                urlencoding::encode(user),
                urlencoding::encode(pass),
                self.host()
            ),
            _ => format!("mongodb://{}", self.host()),
        }
    }

    /// Whether the connection carries credentials
    pub fn is_authenticated(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}

// Keeps the password out of logs.
impl std::fmt::Debug for MongoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoConfig")
            .field("service", &self.service)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("port", &self.port)
            .finish()
    }
}
