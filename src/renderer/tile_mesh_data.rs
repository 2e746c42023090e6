//! Tile Mesh Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in tile_mesh_operations.rs

use super::vertex::TerrainVertex;
use crate::lod::{TileCoords, TileKey};
use cgmath::Point3;

/// Renderable geometry for one quadtree leaf
///
/// Vertex layout: `resolution^2` grid vertices (row-major, x fastest),
/// followed by four runs of `resolution` skirt vertices for the z=0,
/// z=max, x=0 and x=max edges. `indices[..skirt_index_start]` are the
/// surface triangles, the rest are skirt triangles.
#[derive(Debug, Clone)]
pub struct TileMesh {
    pub coords: TileCoords,
    pub key: TileKey,

    /// World position of the tile's min corner (y is always 0)
    pub origin: Point3<f64>,

    /// World side length
    pub size: f64,

    pub resolution: u32,

    pub vertices: Vec<TerrainVertex>,
    pub indices: Vec<u32>,
    pub skirt_index_start: usize,

    /// Downward offset of the skirt vertices
    pub skirt_depth: f64,

    /// Surface height range, skirts excluded
    pub min_height: f32,
    pub max_height: f32,

    /// 0 on first build, incremented on each rebuild
    pub generation: u64,
}
