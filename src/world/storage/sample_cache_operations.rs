//! Sample Cache Operations - Paged bilinear memoization
//!
//! Grid coordinates split into `page = g >> PAGE_BITS` and
//! `local = g & PAGE_MASK`. Arithmetic shift keeps negative coordinates
//! on the correct page.

use super::sample_cache_data::{SampleCacheData, SamplePage};
use crate::bounds::DirtyAabb;
use crate::constants::cache::{PAGE_BITS, PAGE_CELLS, PAGE_MASK, PAGE_SIZE};
use crate::keys::{clamp_to_i32, pack_cell_key, unpack_cell_key};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// Create an empty cache over a grid of the given spacing
pub fn create_sample_cache(grid_size: f64) -> SampleCacheData {
    SampleCacheData {
        grid_size,
        pages: RwLock::new(FxHashMap::default()),
    }
}

/// Page with every cell marked as not computed
pub fn create_empty_page() -> SamplePage {
    SamplePage {
        values: vec![f64::NAN; PAGE_CELLS].into_boxed_slice(),
    }
}

/// Split a grid coordinate into (page, local index)
#[inline]
pub fn split_grid_coord(g: i64) -> (i64, usize) {
    (g >> PAGE_BITS, (g & PAGE_MASK) as usize)
}

#[inline]
fn page_key(px: i64, pz: i64) -> u64 {
    pack_cell_key(clamp_to_i32(px), clamp_to_i32(pz))
}

/// Memoized value at integer grid point (gx, gz)
///
/// `compute` receives world coordinates and runs at most once per cell
/// unless two threads miss the same cell at the same time, in which case
/// the first insert wins and both return it.
pub fn cached_grid_value<F>(cache: &SampleCacheData, gx: i64, gz: i64, compute: &F) -> f64
where
    F: Fn(f64, f64) -> f64,
{
    let (px, lx) = split_grid_coord(gx);
    let (pz, lz) = split_grid_coord(gz);
    let key = page_key(px, pz);
    let index = lz * PAGE_SIZE + lx;

    {
        let pages = cache.pages.read();
        if let Some(page) = pages.get(&key) {
            let value = page.values[index];
            if !value.is_nan() {
                return value;
            }
        }
    }

    let computed = compute(gx as f64 * cache.grid_size, gz as f64 * cache.grid_size);

    let mut pages = cache.pages.write();
    let page = pages.entry(key).or_insert_with(|| {
        log::trace!("[cached_grid_value] Allocating page ({}, {})", px, pz);
        create_empty_page()
    });
    let slot = &mut page.values[index];
    if slot.is_nan() {
        *slot = computed;
    }
    *slot
}

/// Bilinear interpolation over memoized grid corners
///
/// Coordinates that are not finite collapse onto grid point (0, 0)
/// rather than failing.
pub fn cached_bilinear<F>(cache: &SampleCacheData, x: f64, z: f64, compute: &F) -> f64
where
    F: Fn(f64, f64) -> f64,
{
    let gx = x / cache.grid_size;
    let gz = z / cache.grid_size;
    let x0 = gx.floor();
    let z0 = gz.floor();
    let (ix, iz, fx, fz) = if gx.is_finite() && gz.is_finite() {
        (x0 as i64, z0 as i64, gx - x0, gz - z0)
    } else {
        (0, 0, 0.0, 0.0)
    };
    let ix1 = ix.saturating_add(1);
    let iz1 = iz.saturating_add(1);

    let v00 = cached_grid_value(cache, ix, iz, compute);
    let v10 = cached_grid_value(cache, ix1, iz, compute);
    let v01 = cached_grid_value(cache, ix, iz1, compute);
    let v11 = cached_grid_value(cache, ix1, iz1, compute);

    let top = v00 + (v10 - v00) * fx;
    let bottom = v01 + (v11 - v01) * fx;
    top + (bottom - top) * fz
}

/// Drop every page holding a grid point inside the rectangle
///
/// Returns the number of pages removed. They refill lazily.
pub fn invalidate_pages_in_aabb(cache: &SampleCacheData, aabb: &DirtyAabb) -> usize {
    let min_gx = (aabb.min_x / cache.grid_size).floor() as i64;
    let min_gz = (aabb.min_z / cache.grid_size).floor() as i64;
    let max_gx = (aabb.max_x / cache.grid_size).ceil() as i64;
    let max_gz = (aabb.max_z / cache.grid_size).ceil() as i64;

    let (min_px, _) = split_grid_coord(min_gx);
    let (min_pz, _) = split_grid_coord(min_gz);
    let (max_px, _) = split_grid_coord(max_gx);
    let (max_pz, _) = split_grid_coord(max_gz);

    let mut pages = cache.pages.write();
    let before = pages.len();
    pages.retain(|key, _| {
        let (px, pz) = unpack_cell_key(*key);
        let (px, pz) = (px as i64, pz as i64);
        !(px >= min_px && px <= max_px && pz >= min_pz && pz <= max_pz)
    });
    before - pages.len()
}

/// Number of allocated pages
pub fn cached_page_count(cache: &SampleCacheData) -> usize {
    cache.pages.read().len()
}

/// Drop every page
pub fn clear_sample_cache(cache: &SampleCacheData) {
    cache.pages.write().clear();
}
