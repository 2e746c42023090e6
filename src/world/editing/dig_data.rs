//! Dig Layer Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in dig_operations.rs

use crate::bounds::DirtyAabb;
use crate::lod::TileKey;
use rustc_hash::{FxHashMap, FxHashSet};

/// One resolution of the edit layer
///
/// Values live at lattice points `(ix * cell_size, iz * cell_size)` and are
/// keyed by `pack_cell_key(ix, iz)`. Every stored depth is positive.
#[derive(Debug, Clone, Default)]
pub struct DigLayer {
    pub cell_size: f64,
    pub cells: FxHashMap<u64, f64>,
}

/// All dig resolutions, finest first
#[derive(Debug, Clone, Default)]
pub struct DigLayers {
    pub layers: Vec<DigLayer>,
}

/// Pending change notifications, drained once per frame
#[derive(Debug, Clone, Default)]
pub struct DirtySets {
    pub tiles: FxHashSet<TileKey>,
    pub aabbs: Vec<DirtyAabb>,
}
