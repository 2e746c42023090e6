//! Cell Metadata Operations
//!
//! Placement systems cull whole cells by vertical extent before touching
//! individual instances. Bounds come from five approximate height samples
//! (four corners and the centre), so they are a hint, not a guarantee.

use super::cell_meta_data::{CellMeta, CellMetaCache};
use crate::bounds::{aabb_intersects, create_aabb, DirtyAabb};
use crate::keys::{clamp_to_i32, pack_cell_key, unpack_cell_key};
use crate::world::data_types::TerrainData;
use crate::world::world_operations::get_base_height_approx;
use rustc_hash::FxHashMap;

/// Create an empty cache for cells of `cell_size` meters
pub fn create_cell_meta_cache(cell_size: f64) -> CellMetaCache {
    CellMetaCache {
        cell_size,
        cells: FxHashMap::default(),
    }
}

/// Cell containing a world point
pub fn world_to_cell(cache: &CellMetaCache, x: f64, z: f64) -> (i64, i64) {
    (
        (x / cache.cell_size).floor() as i64,
        (z / cache.cell_size).floor() as i64,
    )
}

/// World rectangle covered by a cell
pub fn cell_bounds(cache: &CellMetaCache, cx: i64, cz: i64) -> DirtyAabb {
    let x = cx as f64 * cache.cell_size;
    let z = cz as f64 * cache.cell_size;
    create_aabb(x, z, x + cache.cell_size, z + cache.cell_size)
}

/// Sample the four corners and centre of a cell
pub fn compute_cell_meta(terrain: &TerrainData, cache: &CellMetaCache, cx: i64, cz: i64) -> CellMeta {
    let bounds = cell_bounds(cache, cx, cz);
    let center_x = (bounds.min_x + bounds.max_x) * 0.5;
    let center_z = (bounds.min_z + bounds.max_z) * 0.5;

    let corners_and_center = [
        (bounds.min_x, bounds.min_z),
        (bounds.max_x, bounds.min_z),
        (bounds.min_x, bounds.max_z),
        (bounds.max_x, bounds.max_z),
        (center_x, center_z),
    ];

    let (min_y, max_y) = corners_and_center
        .iter()
        .map(|&(x, z)| get_base_height_approx(terrain, x, z))
        .fold((f64::MAX, f64::MIN), |(lo, hi), h| (lo.min(h), hi.max(h)));

    CellMeta {
        center_x,
        center_z,
        min_y,
        max_y,
    }
}

/// Cached metadata for a cell, computed on first use
pub fn cell_meta(terrain: &TerrainData, cache: &mut CellMetaCache, cx: i64, cz: i64) -> CellMeta {
    let key = pack_cell_key(clamp_to_i32(cx), clamp_to_i32(cz));
    if let Some(meta) = cache.cells.get(&key) {
        return *meta;
    }
    let meta = compute_cell_meta(terrain, cache, cx, cz);
    cache.cells.insert(key, meta);
    meta
}

/// Drop every cached cell touching a dirty rectangle
///
/// # Returns
/// Number of cells removed
pub fn invalidate_cell_meta(cache: &mut CellMetaCache, aabb: &DirtyAabb) -> usize {
    let before = cache.cells.len();
    let cell_size = cache.cell_size;
    cache.cells.retain(|key, _| {
        let (cx, cz) = unpack_cell_key(*key);
        let x = cx as f64 * cell_size;
        let z = cz as f64 * cell_size;
        !aabb_intersects(&create_aabb(x, z, x + cell_size, z + cell_size), aabb)
    });
    let removed = before - cache.cells.len();
    if removed > 0 {
        log::trace!("[invalidate_cell_meta] Dropped {} cells", removed);
    }
    removed
}

/// Vertical overlap test against a [min_y, max_y] span
pub fn cell_meta_intersects(meta: &CellMeta, aabb_min_y: f64, aabb_max_y: f64) -> bool {
    meta.min_y <= aabb_max_y && meta.max_y >= aabb_min_y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::aabb_from_center_radius;
    use crate::config::TerrainConfig;
    use crate::world::world_operations::{add_dig_sphere, create_terrain_data, pop_dirty_aabbs};

    #[test]
    fn test_world_to_cell_floors() {
        let cache = create_cell_meta_cache(16.0);
        assert_eq!(world_to_cell(&cache, 0.0, 15.9), (0, 0));
        assert_eq!(world_to_cell(&cache, -0.1, 16.0), (-1, 1));
    }

    #[test]
    fn test_meta_bounds_are_ordered_and_cached() {
        let terrain = create_terrain_data(TerrainConfig::default()).expect("valid config");
        let mut cache = create_cell_meta_cache(16.0);

        let meta = cell_meta(&terrain, &mut cache, 3, -2);
        assert!(meta.min_y <= meta.max_y);
        assert_eq!((meta.center_x, meta.center_z), (56.0, -24.0));
        assert_eq!(cache.cells.len(), 1);
        assert_eq!(cell_meta(&terrain, &mut cache, 3, -2), meta);
        assert!(cell_meta_intersects(&meta, meta.min_y - 1.0, meta.min_y));
        assert!(!cell_meta_intersects(&meta, meta.max_y + 1.0, meta.max_y + 2.0));
    }

    #[test]
    fn test_dirty_aabbs_drop_affected_cells() {
        let mut terrain = create_terrain_data(TerrainConfig::default()).expect("valid config");
        let mut cache = create_cell_meta_cache(16.0);
        let near = cell_meta(&terrain, &mut cache, 0, 0);
        cell_meta(&terrain, &mut cache, 40, 40);

        add_dig_sphere(&mut terrain, 8.0, 8.0, 6.0, 4.0);
        let mut removed = 0;
        for aabb in pop_dirty_aabbs(&terrain) {
            removed += invalidate_cell_meta(&mut cache, &aabb);
        }
        assert_eq!(removed, 1);
        assert_eq!(cache.cells.len(), 1);

        let refreshed = cell_meta(&terrain, &mut cache, 0, 0);
        let center = get_base_height_approx(&terrain, 8.0, 8.0);
        assert!(refreshed.min_y <= near.min_y);
        assert!(refreshed.min_y <= center);
        assert!(center < near.max_y);
    }

    #[test]
    fn test_invalidate_far_away_is_noop() {
        let terrain = create_terrain_data(TerrainConfig::default()).expect("valid config");
        let mut cache = create_cell_meta_cache(8.0);
        cell_meta(&terrain, &mut cache, 0, 0);
        assert_eq!(
            invalidate_cell_meta(&mut cache, &aabb_from_center_radius(1000.0, 1000.0, 5.0)),
            0
        );
    }
}
