//! World Data Types - Pure DOP Structures
//!
//! These are the data structures that world_operations functions operate on.
//! NO METHODS - just pure data.

use super::editing::{DigLayers, DirtySets};
use super::generation::HeightfieldGenerator;
use super::storage::SampleCacheData;
use crate::config::TerrainConfig;
use parking_lot::Mutex;

/// The terrain authority
///
/// Owns the noise streams, the edit layers, both approximate caches and
/// the pending dirty notifications. The quadtree and the tile renderer
/// borrow it; nothing else holds terrain state.
///
/// Queries take `&TerrainData` and are safe to run from many threads at
/// once. Digs take `&mut TerrainData`.
pub struct TerrainData {
    pub config: TerrainConfig,

    pub generator: HeightfieldGenerator,

    pub digs: DigLayers,

    /// Approximate base height on the 4 m grid
    pub height_cache: SampleCacheData,

    /// Approximate slope on the 4 m grid, from approximate normals
    pub slope_cache: SampleCacheData,

    /// Drained by a single consumer per frame
    pub dirty: Mutex<DirtySets>,
}
