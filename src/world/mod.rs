//! Terrain World Module
//!
//! Everything that answers "how high is the ground here" lives under
//! this module, owned by a single `TerrainData` authority.
//!
//! # Architecture Overview
//!
//! - **Generation**: the deterministic layered noise heightfield
//! - **Storage**: paged bilinear caches for approximate queries
//! - **Editing**: the sparse multi-resolution dig layer and dirty sets
//! - **Placement**: per-cell vertical bounds for placement collaborators
//!
//! # Design Principles
//!
//! 1. **DOP architecture**: data in `*_data.rs`, free functions in `*_operations.rs`
//! 2. **Fatal-free queries**: every query returns a finite value
//! 3. **Pull-based notifications**: dirty sets are drained, never pushed

pub mod data_types;
pub mod editing;
pub mod generation;
pub mod placement;
pub mod storage;
pub mod world_operations;

pub use data_types::TerrainData;

pub use generation::{HeightfieldGenerator, Sample};

pub use editing::{DigLayer, DigLayers, DirtySets};

pub use placement::{
    cell_meta, cell_meta_intersects, create_cell_meta_cache, invalidate_cell_meta, CellMeta,
    CellMetaCache,
};

pub use world_operations::{
    add_dig_sphere, cached_page_count, create_terrain_data, dig_cell_count, get_base_height,
    get_base_height_approx, get_height, get_normal, get_normal_approx, get_sample, get_slope,
    get_slope_approx, pop_dirty_aabbs, pop_dirty_tiles,
};
