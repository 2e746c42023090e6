//! Tile Mesh Operations - Pure DOP Functions
//!
//! Samples the heightfield on a regular grid over the tile, derives
//! smooth normals from the grid triangles and hangs a skirt from every
//! border edge. Neighbouring tiles at different LODs sample the border at
//! different spacings; the skirts hide the resulting cracks.

use super::tile_mesh_data::TileMesh;
use super::vertex::{terrain_vertex, TerrainVertex};
use crate::config::TerrainConfig;
use crate::constants::mesh::NORMAL_LENGTH_EPSILON;
use crate::lod::{encode_tile_key, tile_world_origin, tile_world_size, TileCoords};
use crate::world::world_operations::{get_base_height, get_height};
use crate::world::TerrainData;
use cgmath::{InnerSpace, Point3, Vector3};

/// Downward skirt offset for a tile at `lod`
pub fn skirt_depth(config: &TerrainConfig, lod: u32) -> f64 {
    tile_world_size(config, lod) * config.skirt_depth_factor
}

/// Tiles below the vegetation LOD mesh bare ground; instanced vegetation
/// covers them up close
pub fn uses_base_height(config: &TerrainConfig, lod: u32) -> bool {
    lod < config.vegetation_mesh_min_lod
}

/// Whether a resolution fits u32 indices, skirts included
pub fn resolution_fits(resolution: u32) -> bool {
    let r = resolution as u64;
    r >= 2 && r * r + 4 * r <= u32::MAX as u64
}

/// Surface triangles of a `resolution x resolution` grid, counter-clockwise
/// seen from above
pub fn grid_indices(resolution: u32) -> Vec<u32> {
    if !resolution_fits(resolution) {
        return Vec::new();
    }
    let r = resolution;
    let mut indices = Vec::with_capacity(((r - 1) * (r - 1) * 6) as usize);

    for j in 0..r - 1 {
        for i in 0..r - 1 {
            let a = j * r + i;
            let b = a + 1;
            let c = a + r;
            let d = c + 1;
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }
    indices
}

/// Replace every vertex normal with the normalized sum of its adjacent
/// face normals
///
/// Triangles referencing missing vertices are skipped.
pub fn compute_vertex_normals(vertices: &mut [TerrainVertex], indices: &[u32]) {
    let mut sums = vec![Vector3::new(0.0f32, 0.0, 0.0); vertices.len()];

    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        if a >= vertices.len() || b >= vertices.len() || c >= vertices.len() {
            continue;
        }
        let pa = Vector3::from(vertices[a].position);
        let pb = Vector3::from(vertices[b].position);
        let pc = Vector3::from(vertices[c].position);

        // Area-weighted
        let face = (pb - pa).cross(pc - pa);
        sums[a] += face;
        sums[b] += face;
        sums[c] += face;
    }

    for (vertex, sum) in vertices.iter_mut().zip(sums) {
        let length = sum.magnitude();
        vertex.normal = if (length as f64) > NORMAL_LENGTH_EPSILON && length.is_finite() {
            (sum / length).into()
        } else {
            [0.0, 1.0, 0.0]
        };
    }
}

/// Grid indices of each border edge, in z=0, z=max, x=0, x=max order
fn border_edges(resolution: usize) -> [Vec<usize>; 4] {
    let r = resolution;
    [
        (0..r).collect(),
        (0..r).map(|i| (r - 1) * r + i).collect(),
        (0..r).map(|j| j * r).collect(),
        (0..r).map(|j| j * r + r - 1).collect(),
    ]
}

/// Append skirt vertices and triangles for all four border edges
///
/// Skirt vertices duplicate the border vertices `depth` lower and copy
/// their normals. Faces point away from the tile. Does nothing when the
/// grid is incomplete.
pub fn append_skirts(
    vertices: &mut Vec<TerrainVertex>,
    indices: &mut Vec<u32>,
    resolution: u32,
    depth: f32,
) {
    if !resolution_fits(resolution) {
        return;
    }
    let r = resolution as usize;
    if vertices.len() < r * r {
        return;
    }

    for (edge, sources) in border_edges(r).iter().enumerate() {
        let start = vertices.len() as u32;
        for &source in sources {
            let v = vertices[source];
            vertices.push(terrain_vertex(
                [v.position[0], v.position[1] - depth, v.position[2]],
                v.normal,
            ));
        }

        // The z=0 and x=max runs wind one way, the other two the opposite
        let flip = edge == 1 || edge == 2;
        for k in 0..r - 1 {
            let v0 = sources[k] as u32;
            let v1 = sources[k + 1] as u32;
            let s0 = start + k as u32;
            let s1 = s0 + 1;
            if flip {
                indices.extend_from_slice(&[v0, s0, v1, v1, s0, s1]);
            } else {
                indices.extend_from_slice(&[v0, v1, s0, v1, s1, s0]);
            }
        }
    }
}

/// Mesh with no geometry, used when the grid cannot be built
pub fn empty_tile_mesh(config: &TerrainConfig, coords: TileCoords) -> TileMesh {
    let (x, z, size) = tile_world_origin(config, coords);
    TileMesh {
        coords,
        key: encode_tile_key(coords),
        origin: Point3::new(x, 0.0, z),
        size,
        resolution: config.tile_resolution,
        vertices: Vec::new(),
        indices: Vec::new(),
        skirt_index_start: 0,
        skirt_depth: skirt_depth(config, coords.lod),
        min_height: 0.0,
        max_height: 0.0,
        generation: 0,
    }
}

/// Build the full mesh for one tile
pub fn build_tile_mesh(terrain: &TerrainData, coords: TileCoords) -> TileMesh {
    let config = &terrain.config;
    let resolution = config.tile_resolution;
    if !resolution_fits(resolution) {
        log::warn!(
            "[build_tile_mesh] Tile {} skipped: resolution {} cannot be indexed",
            encode_tile_key(coords),
            resolution
        );
        return empty_tile_mesh(config, coords);
    }

    let mut mesh = empty_tile_mesh(config, coords);
    let (ox, oz, size) = (mesh.origin.x, mesh.origin.z, mesh.size);
    let r = resolution as usize;
    let span = (r - 1) as f64;
    let base_only = uses_base_height(config, coords.lod);

    let mut vertices = Vec::with_capacity(r * r + 4 * r);
    let mut min_height = f32::MAX;
    let mut max_height = f32::MIN;
    for j in 0..r {
        // Exact at both ends so neighbours share border coordinates
        let lz = size * j as f64 / span;
        for i in 0..r {
            let lx = size * i as f64 / span;
            let h = if base_only {
                get_base_height(terrain, ox + lx, oz + lz)
            } else {
                get_height(terrain, ox + lx, oz + lz)
            } as f32;
            min_height = min_height.min(h);
            max_height = max_height.max(h);
            vertices.push(terrain_vertex([lx as f32, h, lz as f32], [0.0, 1.0, 0.0]));
        }
    }

    let mut indices = grid_indices(resolution);
    compute_vertex_normals(&mut vertices, &indices);
    let skirt_index_start = indices.len();
    append_skirts(&mut vertices, &mut indices, resolution, mesh.skirt_depth as f32);

    mesh.vertices = vertices;
    mesh.indices = indices;
    mesh.skirt_index_start = skirt_index_start;
    mesh.min_height = min_height;
    mesh.max_height = max_height;
    mesh
}

/// Number of triangles, skirts included
pub fn triangle_count(mesh: &TileMesh) -> usize {
    mesh.indices.len() / 3
}
