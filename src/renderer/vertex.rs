//! Terrain vertex layout
//!
//! Tile-local position and normal, tightly packed for direct upload by
//! the presentation layer.

use bytemuck::{Pod, Zeroable};
use static_assertions::{assert_eq_align, assert_eq_size};

/// One terrain mesh vertex
///
/// `position` is relative to the owning tile's world origin so f32 keeps
/// sub-millimetre precision far from the world origin.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

assert_eq_size!(TerrainVertex, [f32; 6]);
assert_eq_align!(TerrainVertex, f32);

/// Byte stride of one vertex
pub const TERRAIN_VERTEX_STRIDE: usize = std::mem::size_of::<TerrainVertex>();

pub fn terrain_vertex(position: [f32; 3], normal: [f32; 3]) -> TerrainVertex {
    TerrainVertex { position, normal }
}

/// Raw bytes of a vertex slice
pub fn vertex_bytes(vertices: &[TerrainVertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_bytes_length() {
        let vertices = vec![terrain_vertex([1.0, 2.0, 3.0], [0.0, 1.0, 0.0]); 4];
        assert_eq!(vertex_bytes(&vertices).len(), 4 * TERRAIN_VERTEX_STRIDE);
        assert_eq!(TERRAIN_VERTEX_STRIDE, 24);
    }
}
