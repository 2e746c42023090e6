//! Dig Operations - Sparse multi-resolution depressions
//!
//! Stamps are additive spherical caps rasterized into the layer whose
//! cell size best fits the stamp radius. Sampling sums a bilinear read of
//! every layer, so stamps of different sizes compose smoothly.

use super::dig_data::{DigLayer, DigLayers, DirtySets};
use crate::bounds::{aabb_expanded, aabb_from_center_radius, DirtyAabb};
use crate::config::TerrainConfig;
use crate::constants::dig::{
    BASE_CELL_SIZE, CELLS_PER_RADIUS, EVICT_EPSILON, LAYER_COUNT, MAX_DIG_RADIUS,
};
use crate::keys::{clamp_to_i32, pack_cell_key};
use crate::lod::{encode_tile_key, tiles_overlapping, TileKey};

/// Create empty layers at cell sizes 0.5 * 2^i
pub fn create_dig_layers() -> DigLayers {
    DigLayers {
        layers: (0..LAYER_COUNT)
            .map(|i| DigLayer {
                cell_size: BASE_CELL_SIZE * (1u32 << i) as f64,
                cells: Default::default(),
            })
            .collect(),
    }
}

/// Index of the layer whose cell size is closest to `radius / 6`
///
/// Ties go to the finer layer.
pub fn select_layer_index(layers: &DigLayers, radius: f64) -> usize {
    let target = radius / CELLS_PER_RADIUS;
    let mut best = 0;
    let mut best_error = f64::MAX;
    for (i, layer) in layers.layers.iter().enumerate() {
        let error = (layer.cell_size - target).abs();
        if error < best_error {
            best = i;
            best_error = error;
        }
    }
    best
}

/// Spherical cap falloff of a stamp at horizontal distance `dist`
#[inline]
pub fn dig_falloff(depth: f64, radius: f64, dist: f64) -> f64 {
    let t = dist / radius;
    depth * (1.0 - t * t).max(0.0).sqrt()
}

/// Stamp a depression into the best-fitting layer
///
/// Radii above `MAX_DIG_RADIUS` are clamped to it.
///
/// # Returns
/// The footprint: every point whose dig depth may have changed. Bilinear
/// reads reach one cell past the last stamped cell, so this is the radius
/// square grown by the layer's cell size. `None` when the stamp is empty
/// (non-positive or non-finite radius/depth/center).
pub fn stamp_dig(layers: &mut DigLayers, x: f64, z: f64, radius: f64, depth: f64) -> Option<DirtyAabb> {
    if !(radius > 0.0 && depth > 0.0)
        || !radius.is_finite()
        || !depth.is_finite()
        || !x.is_finite()
        || !z.is_finite()
    {
        log::warn!(
            "[stamp_dig] Ignoring dig at ({}, {}) with radius {} depth {}",
            x,
            z,
            radius,
            depth
        );
        return None;
    }

    let radius = if radius > MAX_DIG_RADIUS {
        log::warn!(
            "[stamp_dig] Clamping dig radius {} to {}",
            radius,
            MAX_DIG_RADIUS
        );
        MAX_DIG_RADIUS
    } else {
        radius
    };

    let index = select_layer_index(layers, radius);
    let layer = layers.layers.get_mut(index)?;
    let cell_size = layer.cell_size;

    let min_ix = ((x - radius) / cell_size).ceil() as i64;
    let max_ix = ((x + radius) / cell_size).floor() as i64;
    let min_iz = ((z - radius) / cell_size).ceil() as i64;
    let max_iz = ((z + radius) / cell_size).floor() as i64;

    let mut stamped = 0usize;
    for iz in min_iz..=max_iz {
        for ix in min_ix..=max_ix {
            let dx = ix as f64 * cell_size - x;
            let dz = iz as f64 * cell_size - z;
            let dist = (dx * dx + dz * dz).sqrt();
            if dist > radius {
                continue;
            }

            let amount = dig_falloff(depth, radius, dist);
            let key = pack_cell_key(clamp_to_i32(ix), clamp_to_i32(iz));
            let total = layer.cells.get(&key).copied().unwrap_or(0.0) + amount;
            if total > EVICT_EPSILON {
                layer.cells.insert(key, total);
                stamped += 1;
            } else {
                layer.cells.remove(&key);
            }
        }
    }

    log::debug!(
        "[stamp_dig] Stamped {} cells at {}m resolution (layer {})",
        stamped,
        cell_size,
        index
    );

    Some(aabb_expanded(&aabb_from_center_radius(x, z, radius), cell_size))
}

#[inline]
fn cell_value(layer: &DigLayer, ix: i64, iz: i64) -> f64 {
    layer
        .cells
        .get(&pack_cell_key(clamp_to_i32(ix), clamp_to_i32(iz)))
        .copied()
        .unwrap_or(0.0)
}

/// Bilinear read of one layer, missing cells read as 0
pub fn sample_dig_layer(layer: &DigLayer, x: f64, z: f64) -> f64 {
    if layer.cells.is_empty() || !x.is_finite() || !z.is_finite() {
        return 0.0;
    }

    let gx = x / layer.cell_size;
    let gz = z / layer.cell_size;
    let x0 = gx.floor();
    let z0 = gz.floor();
    let fx = gx - x0;
    let fz = gz - z0;
    let ix = x0 as i64;
    let iz = z0 as i64;

    let v00 = cell_value(layer, ix, iz);
    let v10 = cell_value(layer, ix + 1, iz);
    let v01 = cell_value(layer, ix, iz + 1);
    let v11 = cell_value(layer, ix + 1, iz + 1);

    v00 * (1.0 - fx) * (1.0 - fz) + v10 * fx * (1.0 - fz) + v01 * (1.0 - fx) * fz + v11 * fx * fz
}

/// Summed dig depth of every layer at a point. Never negative.
pub fn sample_dig(layers: &DigLayers, x: f64, z: f64) -> f64 {
    layers
        .layers
        .iter()
        .map(|layer| sample_dig_layer(layer, x, z))
        .sum()
}

/// Total stored cells across all layers
pub fn dig_cell_count(layers: &DigLayers) -> usize {
    layers.layers.iter().map(|layer| layer.cells.len()).sum()
}

// ============================================================================
// DIRTY NOTIFICATIONS
// ============================================================================

/// Record an edit: every tile at every LOD overlapping its footprint, plus
/// the footprint itself
///
/// # Returns
/// Number of tile keys newly added to the pending set
pub fn record_dirty_region(dirty: &mut DirtySets, config: &TerrainConfig, aabb: DirtyAabb) -> usize {
    let mut added = 0;
    for lod in config.min_lod..=config.max_lod {
        for coords in tiles_overlapping(config, &aabb, lod) {
            if dirty.tiles.insert(encode_tile_key(coords)) {
                added += 1;
            }
        }
    }
    dirty.aabbs.push(aabb);
    added
}

/// Take every pending tile key, sorted
pub fn drain_dirty_tiles(dirty: &mut DirtySets) -> Vec<TileKey> {
    let mut tiles: Vec<TileKey> = dirty.tiles.drain().collect();
    tiles.sort_unstable();
    tiles
}

/// Take every pending AABB in edit order
pub fn drain_dirty_aabbs(dirty: &mut DirtySets) -> Vec<DirtyAabb> {
    std::mem::take(&mut dirty.aabbs)
}
