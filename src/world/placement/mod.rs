//! Placement helpers
//!
//! Per-cell vertical bounds for object placement collaborators. The
//! dirty AABB channel keeps them in step with digs.

pub mod cell_meta_data;
pub mod cell_meta_operations;

pub use cell_meta_data::{CellMeta, CellMetaCache};
pub use cell_meta_operations::{
    cell_bounds, cell_meta, cell_meta_intersects, compute_cell_meta, create_cell_meta_cache,
    invalidate_cell_meta, world_to_cell,
};
