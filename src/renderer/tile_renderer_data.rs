//! Tile Renderer Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in tile_renderer_operations.rs

use super::tile_mesh_data::TileMesh;
use crate::lod::TileKey;
use rustc_hash::{FxHashMap, FxHashSet};

/// Live tile meshes and rebuild bookkeeping
///
/// Per key: absent -> built -> (rebuilt on dirty)* -> absent.
#[derive(Debug, Default)]
pub struct TileRendererData {
    /// Exactly one mesh per currently visible tile
    pub meshes: FxHashMap<TileKey, TileMesh>,

    /// Dirty keys carried over when a frame's rebuild budget ran out
    pub pending_rebuilds: FxHashSet<TileKey>,

    pub frame: u64,

    pub last_report: FrameReport,
}

/// What one `update_and_render` call did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub visible: usize,
    pub built: usize,
    pub rebuilt: usize,
    pub retired: usize,
    /// Dirty tiles left for a later frame
    pub deferred: usize,
}
