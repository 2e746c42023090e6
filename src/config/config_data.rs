//! Terrain configuration data - Pure DOP
//!
//! NO METHODS beyond Default. Validation and loading live in
//! config_operations.rs

use serde::{Deserialize, Serialize};

/// Terrain engine configuration
///
/// Together with `seed` this fully determines the unedited terrain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// World meters covered by one LOD 0 tile
    pub tile_size: f64,

    /// Mesh vertices per tile side
    pub tile_resolution: u32,

    /// Most detailed level the quadtree may refine to
    pub min_lod: u32,

    /// Coarsest level; defines the root tiles
    pub max_lod: u32,

    /// Reserved tuning knob, not read by the current algorithms
    pub screen_space_error: f64,

    /// Seed for every noise stream
    pub seed: u32,

    /// Root window half-width in root tiles (2 = 5x5)
    pub root_window_radius: u32,

    /// A tile refines while camera distance < factor * tile world size
    pub refine_distance_factor: f64,

    /// Skirt drop as a fraction of the tile's world size
    pub skirt_depth_factor: f64,

    /// Tiles below this LOD are meshed from base height (no pine bumps)
    pub vegetation_mesh_min_lod: u32,

    /// Drop approximate cache pages touched by a dig
    pub invalidate_approx_on_dig: bool,

    /// Upper bound on dirty-tile rebuilds per frame (None = all)
    pub max_tile_rebuilds_per_frame: Option<usize>,

    /// Build independent tiles on the rayon pool
    pub parallel_mesh_builds: bool,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            tile_size: 64.0,
            tile_resolution: 33,
            min_lod: 0,
            max_lod: 8,
            screen_space_error: 2.0,
            seed: 1337,
            root_window_radius: 2,
            refine_distance_factor: 2.5,
            skirt_depth_factor: 0.1,
            vegetation_mesh_min_lod: 1,
            invalidate_approx_on_dig: true,
            max_tile_rebuilds_per_frame: None,
            parallel_mesh_builds: true,
        }
    }
}
