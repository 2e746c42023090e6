//! Error handling for the terrain engine
//!
//! Only construction and configuration can fail. Queries, digs, quadtree
//! updates and mesh builds degrade to a safe result instead of erroring.

use thiserror::Error;

/// Main error type for the terrain engine
#[derive(Debug, Error)]
pub enum TerrainError {
    #[error("Invalid config: {field} = {value} ({reason})")]
    InvalidConfig {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error for {path}: {error}")]
    ConfigIo { path: String, error: String },

    #[error("Config parse error: {error}")]
    ConfigParse { error: String },
}

/// Type alias for Results in the terrain engine
pub type TerrainResult<T> = Result<T, TerrainError>;

impl From<toml::de::Error> for TerrainError {
    fn from(error: toml::de::Error) -> Self {
        TerrainError::ConfigParse {
            error: error.to_string(),
        }
    }
}
