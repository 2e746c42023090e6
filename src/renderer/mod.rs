//! Terrain tile rendering - DOP style
//!
//! Turns quadtree leaves into crack-free triangle meshes and keeps
//! exactly one current mesh per visible tile. Presentation (GPU upload,
//! materials, shading) is left to the host.
//!
//! - vertex.rs: Pod vertex layout
//! - tile_mesh_*: grid sampling, normals and skirts for one tile
//! - tile_renderer_*: per-frame build / rebuild / retire bookkeeping

pub mod tile_mesh_data;
pub mod tile_mesh_operations;
pub mod tile_renderer_data;
pub mod tile_renderer_operations;
pub mod vertex;

pub use tile_mesh_data::TileMesh;
pub use tile_mesh_operations::{
    append_skirts, build_tile_mesh, compute_vertex_normals, grid_indices, skirt_depth,
    triangle_count,
};
pub use tile_renderer_data::{FrameReport, TileRendererData};
pub use tile_renderer_operations::{
    build_tile_meshes, clear_tile_renderer, create_tile_renderer, get_tile_mesh, mesh_count,
    update_and_render,
};
pub use vertex::{vertex_bytes, TerrainVertex, TERRAIN_VERTEX_STRIDE};
