//! Configuration Module - DOP style
//!
//! - config_data.rs: the serde-backed TerrainConfig
//! - config_operations.rs: validation and TOML loading

pub mod config_data;
pub mod config_operations;

pub use config_data::TerrainConfig;
pub use config_operations::{config_to_toml, load_config_file, parse_config_toml, validate_config};
