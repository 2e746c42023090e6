//! Quadtree Operations - Distance-based tile refinement
//!
//! Roots are a square window of `max_lod` tiles around the camera. A tile
//! splits into its four children while the camera is closer than
//! `refine_distance_factor` tile widths to the tile's centre, measured
//! in 3D against the approximate ground height there. Refinement stops
//! at `min_lod`, so recursion depth never exceeds `max_lod - min_lod`.

use super::quadtree_data::{QuadtreeData, QuadtreeStats};
use super::tile_coords::{
    encode_tile_key, tile_center, tile_children, tile_coords, tile_world_size, world_to_tile_coords,
    TileCoords, TileKey,
};
use crate::world::world_operations::get_base_height_approx;
use crate::world::TerrainData;
use cgmath::{MetricSpace, Point3};
use rustc_hash::FxHashSet;

/// Create an empty quadtree
pub fn create_quadtree() -> QuadtreeData {
    QuadtreeData {
        camera: Point3::new(0.0, 0.0, 0.0),
        visible: Vec::new(),
        stats: QuadtreeStats::default(),
    }
}

/// Root tiles: the (2r+1)^2 window of `max_lod` tiles around the camera
pub fn root_window(terrain: &TerrainData, camera: Point3<f64>) -> Vec<TileCoords> {
    let config = &terrain.config;
    let lod = config.max_lod;
    let (ctx, ctz) = world_to_tile_coords(config, camera.x, camera.z, lod);
    let r = config.root_window_radius as i64;

    let mut roots = Vec::with_capacity(((2 * r + 1) * (2 * r + 1)) as usize);
    for tz in (ctz - r)..=(ctz + r) {
        for tx in (ctx - r)..=(ctx + r) {
            roots.push(tile_coords(tx, tz, lod));
        }
    }
    roots
}

/// Whether a tile should split into its four children
///
/// Always false at or below `min_lod`.
pub fn should_refine(terrain: &TerrainData, coords: TileCoords, camera: Point3<f64>) -> bool {
    let config = &terrain.config;
    if coords.lod <= config.min_lod {
        return false;
    }

    let (cx, cz) = tile_center(config, coords);
    let cy = get_base_height_approx(terrain, cx, cz);
    let distance = camera.distance(Point3::new(cx, cy, cz));

    distance < config.refine_distance_factor * tile_world_size(config, coords.lod)
}

fn refine(
    terrain: &TerrainData,
    coords: TileCoords,
    camera: Point3<f64>,
    root_lod: u32,
    leaves: &mut Vec<TileCoords>,
    stats: &mut QuadtreeStats,
) {
    stats.nodes_visited += 1;

    if should_refine(terrain, coords, camera) {
        for child in tile_children(coords) {
            refine(terrain, child, camera, root_lod, leaves, stats);
        }
    } else {
        stats.max_depth = stats.max_depth.max(root_lod - coords.lod);
        leaves.push(coords);
    }
}

/// Recompute the visible leaf set for a camera position
pub fn update_quadtree(quadtree: &mut QuadtreeData, terrain: &TerrainData, camera: Point3<f64>) {
    let roots = root_window(terrain, camera);
    let root_lod = terrain.config.max_lod;

    let mut stats = QuadtreeStats {
        roots: roots.len(),
        ..QuadtreeStats::default()
    };
    let mut leaves = Vec::new();
    for root in roots {
        refine(terrain, root, camera, root_lod, &mut leaves, &mut stats);
    }

    let mut seen: FxHashSet<TileKey> = FxHashSet::default();
    let before = leaves.len();
    leaves.retain(|coords| seen.insert(encode_tile_key(*coords)));
    leaves.sort_unstable();

    stats.duplicates_dropped = before - leaves.len();
    stats.leaves = leaves.len();

    log::debug!(
        "[update_quadtree] Camera ({:.1}, {:.1}, {:.1}): {} leaves from {} roots, {} nodes, depth {}",
        camera.x,
        camera.y,
        camera.z,
        stats.leaves,
        stats.roots,
        stats.nodes_visited,
        stats.max_depth
    );

    quadtree.camera = camera;
    quadtree.visible = leaves;
    quadtree.stats = stats;
}

/// Leaves of the last update
pub fn get_visible_tiles(quadtree: &QuadtreeData) -> &[TileCoords] {
    &quadtree.visible
}
