//! Terrain configuration operations
//!
//! Validation and TOML loading for [`TerrainConfig`].

use super::config_data::TerrainConfig;
use crate::constants::lod::{MAX_ROOT_WINDOW_RADIUS, MAX_SUPPORTED_LOD};
use crate::error::{TerrainError, TerrainResult};
use anyhow::Context;
use std::path::Path;

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> TerrainError {
    TerrainError::InvalidConfig {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Validate configuration parameters
///
/// Reports the first violated constraint.
pub fn validate_config(config: &TerrainConfig) -> TerrainResult<()> {
    if !config.tile_size.is_finite() || config.tile_size <= 0.0 {
        return Err(invalid(
            "tile_size",
            config.tile_size,
            "must be finite and positive",
        ));
    }

    if config.tile_resolution < 2 {
        return Err(invalid(
            "tile_resolution",
            config.tile_resolution,
            "a tile needs at least 2 vertices per side",
        ));
    }

    if config.min_lod > config.max_lod {
        return Err(invalid(
            "min_lod",
            config.min_lod,
            format!("must not exceed max_lod ({})", config.max_lod),
        ));
    }

    if config.max_lod > MAX_SUPPORTED_LOD {
        return Err(invalid(
            "max_lod",
            config.max_lod,
            format!("must be at most {}", MAX_SUPPORTED_LOD),
        ));
    }

    if config.root_window_radius > MAX_ROOT_WINDOW_RADIUS {
        return Err(invalid(
            "root_window_radius",
            config.root_window_radius,
            format!("must be at most {}", MAX_ROOT_WINDOW_RADIUS),
        ));
    }

    if !config.refine_distance_factor.is_finite() || config.refine_distance_factor < 0.0 {
        return Err(invalid(
            "refine_distance_factor",
            config.refine_distance_factor,
            "must be finite and non-negative",
        ));
    }

    if !config.skirt_depth_factor.is_finite() || config.skirt_depth_factor < 0.0 {
        return Err(invalid(
            "skirt_depth_factor",
            config.skirt_depth_factor,
            "must be finite and non-negative",
        ));
    }

    if config.max_tile_rebuilds_per_frame == Some(0) {
        return Err(invalid(
            "max_tile_rebuilds_per_frame",
            0,
            "use None for unlimited; 0 would starve dirty tiles",
        ));
    }

    log::debug!(
        "[validate_config] tile_size={}, resolution={}, lod={}..={}, seed={}",
        config.tile_size,
        config.tile_resolution,
        config.min_lod,
        config.max_lod,
        config.seed
    );

    Ok(())
}

/// Parse and validate a config from TOML text
///
/// Missing fields fall back to their defaults.
pub fn parse_config_toml(text: &str) -> TerrainResult<TerrainConfig> {
    let config: TerrainConfig = toml::from_str(text)?;
    validate_config(&config)?;
    Ok(config)
}

/// Serialize a config back to TOML text
pub fn config_to_toml(config: &TerrainConfig) -> TerrainResult<String> {
    toml::to_string_pretty(config).map_err(|e| TerrainError::ConfigParse {
        error: e.to_string(),
    })
}

/// Load and validate a config file
pub fn load_config_file(path: impl AsRef<Path>) -> anyhow::Result<TerrainConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|e| TerrainError::ConfigIo {
            path: path.display().to_string(),
            error: e.to_string(),
        })
        .with_context(|| format!("reading terrain config {}", path.display()))?;

    let config = parse_config_toml(&text)
        .with_context(|| format!("parsing terrain config {}", path.display()))?;

    log::info!(
        "[load_config_file] Loaded terrain config from {}",
        path.display()
    );
    Ok(config)
}
