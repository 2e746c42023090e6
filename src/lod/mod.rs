//! Level of detail
//!
//! - tile_coords.rs: tile grid coordinates, packed keys and tile math
//! - quadtree_data.rs / quadtree_operations.rs: camera-driven refinement

pub mod quadtree_data;
pub mod quadtree_operations;
pub mod tile_coords;

pub use quadtree_data::{QuadtreeData, QuadtreeStats};
pub use quadtree_operations::{
    create_quadtree, get_visible_tiles, root_window, should_refine, update_quadtree,
};
pub use tile_coords::{
    decode_tile_key, encode_tile_key, tile_center, tile_children, tile_coords, tile_world_origin,
    tile_world_size, tiles_overlapping, world_to_tile_coords, TileCoords, TileKey,
};
