//! Tile Renderer Operations - Per-frame mesh bookkeeping
//!
//! Each frame: drain the terrain's dirty tiles, retire meshes that left
//! the visible set, build meshes for tiles that entered it and rebuild
//! dirty ones. New tiles are always built; rebuilds may be rationed by
//! `max_tile_rebuilds_per_frame`, nearest first.

use super::tile_mesh_data::TileMesh;
use super::tile_mesh_operations::build_tile_mesh;
use super::tile_renderer_data::{FrameReport, TileRendererData};
use crate::lod::{decode_tile_key, encode_tile_key, tile_center, TileCoords, TileKey};
use crate::world::world_operations::pop_dirty_tiles;
use crate::world::TerrainData;
use cgmath::Point3;
use rustc_hash::FxHashMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub fn create_tile_renderer() -> TileRendererData {
    TileRendererData::default()
}

/// Build a batch of independent tiles
#[cfg(feature = "parallel")]
pub fn build_tile_meshes(terrain: &TerrainData, jobs: &[TileCoords]) -> Vec<TileMesh> {
    if terrain.config.parallel_mesh_builds && jobs.len() > 1 {
        jobs.par_iter()
            .map(|coords| build_tile_mesh(terrain, *coords))
            .collect()
    } else {
        jobs.iter()
            .map(|coords| build_tile_mesh(terrain, *coords))
            .collect()
    }
}

/// Build a batch of independent tiles
#[cfg(not(feature = "parallel"))]
pub fn build_tile_meshes(terrain: &TerrainData, jobs: &[TileCoords]) -> Vec<TileMesh> {
    jobs.iter()
        .map(|coords| build_tile_mesh(terrain, *coords))
        .collect()
}

fn horizontal_distance_sq(terrain: &TerrainData, coords: TileCoords, camera: Point3<f64>) -> f64 {
    let (cx, cz) = tile_center(&terrain.config, coords);
    let (dx, dz) = (cx - camera.x, cz - camera.z);
    dx * dx + dz * dz
}

/// Bring the mesh set in line with the visible tiles
///
/// # Arguments
/// * `renderer` - Mesh store, updated in place
/// * `terrain` - Source of heights; its dirty tile set is drained here
/// * `camera` - Orders rationed rebuilds, nearest first
/// * `visible` - Leaves from the quadtree; duplicates are ignored
pub fn update_and_render(
    renderer: &mut TileRendererData,
    terrain: &TerrainData,
    camera: Point3<f64>,
    visible: &[TileCoords],
) -> FrameReport {
    renderer.frame += 1;

    renderer.pending_rebuilds.extend(pop_dirty_tiles(terrain));

    let visible_keys: FxHashMap<TileKey, TileCoords> = visible
        .iter()
        .map(|coords| (encode_tile_key(*coords), *coords))
        .collect();

    // Retire
    let before = renderer.meshes.len();
    renderer.meshes.retain(|key, _| visible_keys.contains_key(key));
    let retired = before - renderer.meshes.len();

    // Dirty keys only matter for meshes that still exist
    let meshes = &renderer.meshes;
    renderer.pending_rebuilds.retain(|key| meshes.contains_key(key));

    let mut new_tiles: Vec<TileCoords> = visible_keys
        .iter()
        .filter(|(key, _)| !renderer.meshes.contains_key(*key))
        .map(|(_, coords)| *coords)
        .collect();
    new_tiles.sort_unstable();

    let mut rebuilds: Vec<TileCoords> = renderer
        .pending_rebuilds
        .iter()
        .map(|key| decode_tile_key(*key))
        .collect();
    rebuilds.sort_by(|a, b| {
        horizontal_distance_sq(terrain, *a, camera)
            .total_cmp(&horizontal_distance_sq(terrain, *b, camera))
            .then(a.cmp(b))
    });

    let budget = terrain
        .config
        .max_tile_rebuilds_per_frame
        .unwrap_or(usize::MAX);
    let deferred = rebuilds.len().saturating_sub(budget);
    rebuilds.truncate(budget);
    for coords in &rebuilds {
        renderer.pending_rebuilds.remove(&encode_tile_key(*coords));
    }
    if deferred > 0 {
        log::warn!(
            "[update_and_render] Rebuild budget {} reached, deferring {} dirty tiles",
            budget,
            deferred
        );
    }

    let report = FrameReport {
        visible: visible_keys.len(),
        built: new_tiles.len(),
        rebuilt: rebuilds.len(),
        retired,
        deferred,
    };

    let mut jobs = new_tiles;
    jobs.extend(rebuilds);
    for mut mesh in build_tile_meshes(terrain, &jobs) {
        if let Some(previous) = renderer.meshes.get(&mesh.key) {
            mesh.generation = previous.generation + 1;
        }
        renderer.meshes.insert(mesh.key, mesh);
    }

    log::debug!(
        "[update_and_render] Frame {}: {} visible, {} built, {} rebuilt, {} retired, {} deferred",
        renderer.frame,
        report.visible,
        report.built,
        report.rebuilt,
        report.retired,
        report.deferred
    );

    renderer.last_report = report;
    report
}

/// Mesh for a tile, if it is currently visible
pub fn get_tile_mesh(renderer: &TileRendererData, coords: TileCoords) -> Option<&TileMesh> {
    renderer.meshes.get(&encode_tile_key(coords))
}

pub fn mesh_count(renderer: &TileRendererData) -> usize {
    renderer.meshes.len()
}

/// Drop every mesh and pending rebuild
pub fn clear_tile_renderer(renderer: &mut TileRendererData) {
    renderer.meshes.clear();
    renderer.pending_rebuilds.clear();
}
