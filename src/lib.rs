// Hearth Terrain - Data-Oriented Programming (DOP) Architecture
//
// Infinite procedural terrain with a live dig layer, viewed through a
// camera-driven quadtree of crack-free tile meshes.
//
// Data lives in *_data modules, transformations in *_operations modules:
// - world_operations for height / slope / normal queries and digs
// - quadtree_operations for choosing visible tiles
// - tile_renderer_operations for keeping tile meshes current
// - Pure functions over methods

// Constants module
pub mod constants;

// Core modules
pub mod bounds;
pub mod config;
pub mod error;
pub mod keys;

// Essential systems
pub mod lod;
pub mod renderer;
pub mod world;

pub use bounds::DirtyAabb;
pub use config::{load_config_file, parse_config_toml, validate_config, TerrainConfig};
pub use error::{TerrainError, TerrainResult};

// === Tile coordinates and quadtree ===
pub use lod::{
    create_quadtree, decode_tile_key, encode_tile_key, get_visible_tiles, tile_center,
    tile_coords, tile_world_origin, tile_world_size, tiles_overlapping, update_quadtree,
    world_to_tile_coords, QuadtreeData, TileCoords, TileKey,
};

// === Terrain queries and edits ===
pub use world::{
    add_dig_sphere, cached_page_count, create_terrain_data, dig_cell_count, get_base_height,
    get_base_height_approx, get_height, get_normal, get_normal_approx, get_sample, get_slope,
    get_slope_approx, pop_dirty_aabbs, pop_dirty_tiles, Sample, TerrainData,
};

// === Placement ===
pub use world::{
    cell_meta, cell_meta_intersects, create_cell_meta_cache, invalidate_cell_meta, CellMeta,
    CellMetaCache,
};

// === Meshes ===
pub use renderer::{
    build_tile_mesh, create_tile_renderer, update_and_render, FrameReport, TerrainVertex,
    TileMesh, TileRendererData,
};
