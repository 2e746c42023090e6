//! World Operations - Terrain query and edit API
//!
//! This is the PUBLIC API for terrain sampling and digging.
//! Queries never fail: every coordinate yields a finite, deterministic
//! answer for a fixed seed and edit history.
//!
//! This is what renderers and placement systems call directly.

use super::data_types::TerrainData;
use super::editing::{
    create_dig_layers, dig_cell_count as layer_cell_count, drain_dirty_aabbs, drain_dirty_tiles,
    record_dirty_region, sample_dig, stamp_dig, DirtySets,
};
use super::generation::{
    create_heightfield_generator, procedural_height, vegetation_sample, Sample,
};
use super::storage::{
    cached_bilinear, cached_page_count as cache_page_count, create_sample_cache,
    invalidate_pages_in_aabb,
};
use crate::bounds::{aabb_expanded, DirtyAabb};
use crate::config::{validate_config, TerrainConfig};
use crate::constants::cache::{APPROX_GRID_SIZE, NORMAL_EPSILON};
use crate::constants::mesh::NORMAL_LENGTH_EPSILON;
use crate::error::TerrainResult;
use crate::lod::TileKey;
use cgmath::{InnerSpace, Vector3};
use parking_lot::Mutex;

/// Create the terrain authority
///
/// # Arguments
/// * `config` - Validated before anything is allocated
///
/// # Returns
/// `TerrainError::InvalidConfig` naming the first violated constraint
pub fn create_terrain_data(config: TerrainConfig) -> TerrainResult<TerrainData> {
    validate_config(&config)?;
    debug_assert!(config.min_lod <= config.max_lod);

    log::info!(
        "[create_terrain_data] Terrain seed {} tile {}m x{} LOD {}..={}",
        config.seed,
        config.tile_size,
        config.tile_resolution,
        config.min_lod,
        config.max_lod
    );

    Ok(TerrainData {
        generator: create_heightfield_generator(config.seed),
        digs: create_dig_layers(),
        height_cache: create_sample_cache(APPROX_GRID_SIZE),
        slope_cache: create_sample_cache(APPROX_GRID_SIZE),
        dirty: Mutex::new(DirtySets::default()),
        config,
    })
}

// ============================================================================
// HEIGHT QUERIES
// ============================================================================

/// Exact terrain elevation with edits applied, vegetation excluded
pub fn get_base_height(terrain: &TerrainData, x: f64, z: f64) -> f64 {
    procedural_height(&terrain.generator, x, z) - sample_dig(&terrain.digs, x, z)
}

/// Base height interpolated from the paged 4 m cache
pub fn get_base_height_approx(terrain: &TerrainData, x: f64, z: f64) -> f64 {
    cached_bilinear(&terrain.height_cache, x, z, &|wx, wz| {
        get_base_height(terrain, wx, wz)
    })
}

/// Full sample: base height plus vegetation hinting
pub fn get_sample(terrain: &TerrainData, x: f64, z: f64) -> Sample {
    let base_height = get_base_height(terrain, x, z);
    let slope = get_slope_approx(terrain, x, z);
    vegetation_sample(&terrain.generator, x, z, base_height, slope)
}

/// Surface height including vegetation pseudo-height
pub fn get_height(terrain: &TerrainData, x: f64, z: f64) -> f64 {
    get_sample(terrain, x, z).height
}

// ============================================================================
// NORMALS AND SLOPE
// ============================================================================

/// Unit normal from central differences with step `eps`
///
/// Degenerate input falls back to straight up.
pub fn normal_from_differences(
    h_left: f64,
    h_right: f64,
    h_down: f64,
    h_up: f64,
    eps: f64,
) -> Vector3<f64> {
    let n = Vector3::new(h_left - h_right, 2.0 * eps, h_down - h_up);
    let length = n.magnitude();
    if !length.is_finite() || length < NORMAL_LENGTH_EPSILON {
        return Vector3::unit_y();
    }
    n / length
}

/// 0 on flat ground, 1 on a vertical wall
pub fn slope_from_normal(normal: Vector3<f64>) -> f64 {
    (1.0 - normal.y * normal.y).max(0.0).sqrt()
}

/// Exact normal of the base height
pub fn get_normal(terrain: &TerrainData, x: f64, z: f64) -> Vector3<f64> {
    let e = NORMAL_EPSILON;
    normal_from_differences(
        get_base_height(terrain, x - e, z),
        get_base_height(terrain, x + e, z),
        get_base_height(terrain, x, z - e),
        get_base_height(terrain, x, z + e),
        e,
    )
}

/// Normal of the approximate height, stepping one cache cell
pub fn get_normal_approx(terrain: &TerrainData, x: f64, z: f64) -> Vector3<f64> {
    let e = APPROX_GRID_SIZE;
    normal_from_differences(
        get_base_height_approx(terrain, x - e, z),
        get_base_height_approx(terrain, x + e, z),
        get_base_height_approx(terrain, x, z - e),
        get_base_height_approx(terrain, x, z + e),
        e,
    )
}

pub fn get_slope(terrain: &TerrainData, x: f64, z: f64) -> f64 {
    slope_from_normal(get_normal(terrain, x, z))
}

/// Slope interpolated from the paged cache of approximate slopes
pub fn get_slope_approx(terrain: &TerrainData, x: f64, z: f64) -> f64 {
    cached_bilinear(&terrain.slope_cache, x, z, &|wx, wz| {
        slope_from_normal(get_normal_approx(terrain, wx, wz))
    })
}

// ============================================================================
// EDITS
// ============================================================================

/// Dig a spherical-cap depression
///
/// Marks every tile at every LOD overlapping the stamp's footprint dirty
/// and records the footprint. Non-positive radius or depth is a no-op.
pub fn add_dig_sphere(terrain: &mut TerrainData, x: f64, z: f64, radius: f64, depth: f64) {
    let Some(footprint) = stamp_dig(&mut terrain.digs, x, z, radius, depth) else {
        return;
    };

    let added = record_dirty_region(terrain.dirty.get_mut(), &terrain.config, footprint);

    let mut dropped = 0;
    if terrain.config.invalidate_approx_on_dig {
        // Approximate slopes read heights one grid step away
        let stale = aabb_expanded(&footprint, 2.0 * APPROX_GRID_SIZE);
        dropped = invalidate_pages_in_aabb(&terrain.height_cache, &stale)
            + invalidate_pages_in_aabb(&terrain.slope_cache, &stale);
    }

    log::debug!(
        "[add_dig_sphere] Dig at ({:.1}, {:.1}) r={} d={}: {} dirty tiles, {} cache pages dropped",
        x,
        z,
        radius,
        depth,
        added,
        dropped
    );
}

/// Take the tile keys dirtied since the previous call
pub fn pop_dirty_tiles(terrain: &TerrainData) -> Vec<TileKey> {
    drain_dirty_tiles(&mut terrain.dirty.lock())
}

/// Take the edit rectangles recorded since the previous call
pub fn pop_dirty_aabbs(terrain: &TerrainData) -> Vec<DirtyAabb> {
    drain_dirty_aabbs(&mut terrain.dirty.lock())
}

// ============================================================================
// DIAGNOSTICS
// ============================================================================

/// Allocated pages of the (height, slope) caches
pub fn cached_page_count(terrain: &TerrainData) -> (usize, usize) {
    (
        cache_page_count(&terrain.height_cache),
        cache_page_count(&terrain.slope_cache),
    )
}

/// Stored dig cells across every layer
pub fn dig_cell_count(terrain: &TerrainData) -> usize {
    layer_cell_count(&terrain.digs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::aabb_contains_point;
    use crate::constants::dig::MAX_DIG_RADIUS;
    use crate::error::TerrainError;
    use crate::lod::{encode_tile_key, tile_coords, world_to_tile_coords};

    fn terrain() -> TerrainData {
        create_terrain_data(TerrainConfig::default()).expect("default config is valid")
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = TerrainConfig {
            min_lod: 5,
            max_lod: 2,
            ..TerrainConfig::default()
        };
        match create_terrain_data(config) {
            Err(TerrainError::InvalidConfig { field, .. }) => assert_eq!(field, "min_lod"),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("min_lod > max_lod must be rejected"),
        }
    }

    #[test]
    fn test_normal_is_unit_and_upward() {
        let terrain = terrain();
        for i in 0..30 {
            let x = i as f64 * 311.0 - 4000.0;
            let n = get_normal(&terrain, x, -x * 0.3);
            assert!((n.magnitude() - 1.0).abs() < 1e-9);
            assert!(n.y > 0.0);
            let slope = get_slope(&terrain, x, -x * 0.3);
            assert!((0.0..=1.0).contains(&slope));
        }
    }

    #[test]
    fn test_normal_from_flat_and_degenerate_input() {
        let flat = normal_from_differences(3.0, 3.0, 3.0, 3.0, 0.5);
        assert_eq!(flat, Vector3::unit_y());
        assert_eq!(slope_from_normal(flat), 0.0);

        let degenerate = normal_from_differences(0.0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(degenerate, Vector3::unit_y());

        // 45 degree ramp along x
        let ramp = normal_from_differences(0.0, 1.0, 0.0, 0.0, 0.5);
        assert!((slope_from_normal(ramp) - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn test_sample_height_is_base_plus_pine() {
        let terrain = terrain();
        for i in 0..40 {
            let x = i as f64 * 57.3;
            let z = i as f64 * -23.1;
            let sample = get_sample(&terrain, x, z);
            assert_eq!(sample.base_height, get_base_height(&terrain, x, z));
            assert!(sample.pine >= 0.0);
            assert_eq!(sample.height, sample.base_height + sample.pine);
            assert_eq!(get_height(&terrain, x, z), sample.height);
        }
    }

    #[test]
    fn test_approx_height_exact_on_grid_points() {
        let terrain = terrain();
        for i in -5..5 {
            let x = i as f64 * APPROX_GRID_SIZE * 7.0;
            let z = i as f64 * APPROX_GRID_SIZE * -3.0;
            assert_eq!(get_base_height_approx(&terrain, x, z), get_base_height(&terrain, x, z));
        }
    }

    #[test]
    fn test_dig_lowers_and_marks_dirty() {
        let mut terrain = terrain();
        let before = get_base_height(&terrain, 100.0, 100.0);
        add_dig_sphere(&mut terrain, 100.0, 100.0, 5.0, 2.0);
        let after = get_base_height(&terrain, 100.0, 100.0);
        assert!((before - after - 2.0).abs() < 1e-9);

        assert!(!pop_dirty_tiles(&terrain).is_empty());
        assert_eq!(pop_dirty_aabbs(&terrain).len(), 1);
        assert!(pop_dirty_tiles(&terrain).is_empty());
        assert!(dig_cell_count(&terrain) > 0);
    }

    #[test]
    fn test_dig_bleed_past_radius_is_marked_dirty() {
        // 50 m tiles are not a multiple of the 4 m layer picked for r = 29.9
        let config = TerrainConfig {
            tile_size: 50.0,
            ..TerrainConfig::default()
        };
        let mut terrain = create_terrain_data(config).expect("valid config");
        let (cx, cz, radius) = (20.0, 25.0, 29.9);

        let ring: Vec<(f64, f64)> = (0..72)
            .flat_map(|i| {
                let angle = i as f64 * std::f64::consts::PI / 36.0;
                [0.5, 2.0, 3.5].map(|out| {
                    let d = radius + out;
                    (cx + d * angle.cos(), cz + d * angle.sin())
                })
            })
            .chain([(51.0, 24.0)])
            .collect();
        let before: Vec<f64> = ring.iter().map(|&(x, z)| get_base_height(&terrain, x, z)).collect();

        add_dig_sphere(&mut terrain, cx, cz, radius, 5.0);
        let tiles = pop_dirty_tiles(&terrain);
        let aabbs = pop_dirty_aabbs(&terrain);

        assert!(
            get_base_height(&terrain, 51.0, 24.0) < before[ring.len() - 1],
            "bilinear bleed reaches past the radius"
        );
        assert!(tiles.contains(&encode_tile_key(tile_coords(1, 0, 0))));

        for (&(x, z), &was) in ring.iter().zip(&before) {
            if get_base_height(&terrain, x, z) == was {
                continue;
            }
            let (tx, tz) = world_to_tile_coords(&terrain.config, x, z, 0);
            assert!(
                tiles.contains(&encode_tile_key(tile_coords(tx, tz, 0))),
                "({}, {}) changed but tile ({}, {}) was not dirtied",
                x,
                z,
                tx,
                tz
            );
            assert!(aabbs.iter().any(|aabb| aabb_contains_point(aabb, x, z)));
        }
    }

    #[test]
    fn test_oversized_dig_is_clamped() {
        let mut terrain = terrain();
        add_dig_sphere(&mut terrain, 0.0, 0.0, 1.0e6, 1.0);

        let aabbs = pop_dirty_aabbs(&terrain);
        assert_eq!(aabbs.len(), 1);
        assert!(aabbs[0].max_x - aabbs[0].min_x < 2.0 * (MAX_DIG_RADIUS + 64.0));
        assert!(!pop_dirty_tiles(&terrain).is_empty());
        assert!(get_base_height(&terrain, 0.0, 0.0).is_finite());
    }

    #[test]
    fn test_dig_invalidates_approx_cache() {
        let mut terrain = terrain();
        let stale = get_base_height_approx(&terrain, 200.0, 200.0);
        assert!(cached_page_count(&terrain).0 > 0);

        add_dig_sphere(&mut terrain, 200.0, 200.0, 8.0, 3.0);
        let fresh = get_base_height_approx(&terrain, 200.0, 200.0);
        assert!(fresh < stale - 2.0, "stale {} fresh {}", stale, fresh);
    }

    #[test]
    fn test_dig_without_invalidation_keeps_stale_cache() {
        let config = TerrainConfig {
            invalidate_approx_on_dig: false,
            ..TerrainConfig::default()
        };
        let mut terrain = create_terrain_data(config).expect("valid config");
        let stale = get_base_height_approx(&terrain, 200.0, 200.0);
        add_dig_sphere(&mut terrain, 200.0, 200.0, 8.0, 3.0);
        assert_eq!(get_base_height_approx(&terrain, 200.0, 200.0), stale);
        assert!(get_base_height(&terrain, 200.0, 200.0) < stale);
    }

    #[test]
    fn test_terrain_is_shareable_across_threads() {
        fn assert_sync<T: Sync + Send>() {}
        assert_sync::<TerrainData>();
    }
}
