//! Quadtree Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in quadtree_operations.rs

use super::tile_coords::TileCoords;
use cgmath::Point3;

/// Camera-driven leaf selection state
///
/// Rebuilt from scratch on every update; nothing carries over between
/// frames except the last result.
#[derive(Debug, Clone)]
pub struct QuadtreeData {
    /// Camera position of the last update
    pub camera: Point3<f64>,

    /// Deduplicated leaves, sorted by (tx, tz, lod)
    pub visible: Vec<TileCoords>,

    pub stats: QuadtreeStats,
}

/// Counters from the last update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuadtreeStats {
    pub roots: usize,
    pub nodes_visited: usize,
    pub leaves: usize,
    pub duplicates_dropped: usize,
    /// Deepest refinement below the root LOD
    pub max_depth: u32,
}
