//! Cell Metadata - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in cell_meta_operations.rs

use rustc_hash::FxHashMap;

/// Cheap vertical bounds of one placement cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMeta {
    pub center_x: f64,
    pub center_z: f64,
    pub min_y: f64,
    pub max_y: f64,
}

/// Lazily filled metadata for a square cell grid
///
/// Keyed by `pack_cell_key(cx, cz)`. Entries go stale on digs and are
/// dropped through the dirty AABB channel.
#[derive(Debug, Clone, Default)]
pub struct CellMetaCache {
    pub cell_size: f64,
    pub cells: FxHashMap<u64, CellMeta>,
}
