//! Terrain editing
//!
//! The sparse multi-resolution dig layer and the pending dirty
//! notifications it produces.

pub mod dig_data;
pub mod dig_operations;

pub use dig_data::{DigLayer, DigLayers, DirtySets};
pub use dig_operations::{
    create_dig_layers, dig_cell_count, drain_dirty_aabbs, drain_dirty_tiles, record_dirty_region,
    sample_dig, select_layer_index, stamp_dig,
};
