//! Tile coordinates and packed tile keys
//!
//! Larger `lod` means a coarser, bigger tile: a tile at `lod` spans
//! `tile_size * 2^lod` meters per side.

use crate::bounds::DirtyAabb;
use crate::config::TerrainConfig;
use crate::constants::lod::MAX_OVERLAP_TILES_PER_AXIS;
use std::fmt;

/// Integer tile grid coordinates at one LOD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoords {
    pub tx: i64,
    pub tz: i64,
    pub lod: u32,
}

/// Packed tile key: 6 bits of LOD, 29 signed bits each of tx and tz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileKey(pub u64);

const COORD_BITS: u32 = 29;
const COORD_MASK: u64 = (1 << COORD_BITS) - 1;
const LOD_SHIFT: u32 = COORD_BITS * 2;

/// Create tile coordinates
pub fn tile_coords(tx: i64, tz: i64, lod: u32) -> TileCoords {
    TileCoords { tx, tz, lod }
}

/// Encode coordinates into a key
///
/// Coordinates outside the 29-bit signed range wrap; at the default
/// 64 m tile that range is billions of meters.
pub fn encode_tile_key(coords: TileCoords) -> TileKey {
    let lod = (coords.lod as u64 & 0x3F) << LOD_SHIFT;
    let tx = (coords.tx as u64 & COORD_MASK) << COORD_BITS;
    let tz = coords.tz as u64 & COORD_MASK;
    TileKey(lod | tx | tz)
}

/// Decode a key back into coordinates
pub fn decode_tile_key(key: TileKey) -> TileCoords {
    let sign_extend = |v: u64| ((v << (64 - COORD_BITS)) as i64) >> (64 - COORD_BITS);
    TileCoords {
        tx: sign_extend((key.0 >> COORD_BITS) & COORD_MASK),
        tz: sign_extend(key.0 & COORD_MASK),
        lod: (key.0 >> LOD_SHIFT) as u32,
    }
}

impl fmt::Display for TileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = decode_tile_key(*self);
        write!(f, "{}:{}:{}", c.lod, c.tx, c.tz)
    }
}

/// World size of a tile side at `lod`
pub fn tile_world_size(config: &TerrainConfig, lod: u32) -> f64 {
    config.tile_size * (1u64 << lod.min(63)) as f64
}

/// Tile containing the world point at `lod`
pub fn world_to_tile_coords(config: &TerrainConfig, x: f64, z: f64, lod: u32) -> (i64, i64) {
    let size = tile_world_size(config, lod);
    ((x / size).floor() as i64, (z / size).floor() as i64)
}

/// World origin (min corner) and side length of a tile
pub fn tile_world_origin(config: &TerrainConfig, coords: TileCoords) -> (f64, f64, f64) {
    let size = tile_world_size(config, coords.lod);
    (coords.tx as f64 * size, coords.tz as f64 * size, size)
}

/// Horizontal center of a tile
pub fn tile_center(config: &TerrainConfig, coords: TileCoords) -> (f64, f64) {
    let (x, z, size) = tile_world_origin(config, coords);
    (x + size * 0.5, z + size * 0.5)
}

/// The four children one level finer, in (2tx,2tz), (2tx+1,2tz),
/// (2tx,2tz+1), (2tx+1,2tz+1) order. Empty at LOD 0.
pub fn tile_children(coords: TileCoords) -> Vec<TileCoords> {
    if coords.lod == 0 {
        return Vec::new();
    }
    let lod = coords.lod - 1;
    let (x, z) = (coords.tx * 2, coords.tz * 2);
    vec![
        tile_coords(x, z, lod),
        tile_coords(x + 1, z, lod),
        tile_coords(x, z + 1, lod),
        tile_coords(x + 1, z + 1, lod),
    ]
}

/// Keep at most `MAX_OVERLAP_TILES_PER_AXIS` tiles of `[min, max]`,
/// centred on the middle of the range
fn capped_range(min: i64, max: i64) -> (i64, i64) {
    if max.saturating_sub(min) < MAX_OVERLAP_TILES_PER_AXIS {
        return (min, max);
    }
    let start = min
        .saturating_add(max.saturating_sub(min) / 2)
        .saturating_sub(MAX_OVERLAP_TILES_PER_AXIS / 2);
    (start, start.saturating_add(MAX_OVERLAP_TILES_PER_AXIS - 1))
}

/// Every tile at `lod` whose area overlaps the rectangle
///
/// Rectangles spanning more than `MAX_OVERLAP_TILES_PER_AXIS` tiles on an
/// axis are cut down to that many around their centre.
pub fn tiles_overlapping(config: &TerrainConfig, aabb: &DirtyAabb, lod: u32) -> Vec<TileCoords> {
    let (min_tx, min_tz) = world_to_tile_coords(config, aabb.min_x, aabb.min_z, lod);
    let (max_tx, max_tz) = world_to_tile_coords(config, aabb.max_x, aabb.max_z, lod);

    let (x_range, z_range) = (capped_range(min_tx, max_tx), capped_range(min_tz, max_tz));
    if (x_range, z_range) != ((min_tx, max_tx), (min_tz, max_tz)) {
        log::warn!(
            "[tiles_overlapping] Rectangle spans {}x{} tiles at LOD {}, keeping the central {}",
            max_tx.saturating_sub(min_tx).saturating_add(1),
            max_tz.saturating_sub(min_tz).saturating_add(1),
            lod,
            MAX_OVERLAP_TILES_PER_AXIS
        );
    }

    let mut tiles = Vec::new();
    for tz in z_range.0..=z_range.1 {
        for tx in x_range.0..=x_range.1 {
            tiles.push(tile_coords(tx, tz, lod));
        }
    }
    tiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::create_aabb;

    #[test]
    fn test_key_round_trip_with_negative_coordinates() {
        for &(tx, tz, lod) in &[(0, 0, 0), (-1, 3, 2), (123_456, -98_765, 8), (-1, -1, 24)] {
            let coords = tile_coords(tx, tz, lod);
            assert_eq!(decode_tile_key(encode_tile_key(coords)), coords);
        }
    }

    #[test]
    fn test_keys_distinguish_lod() {
        let a = encode_tile_key(tile_coords(1, 1, 0));
        let b = encode_tile_key(tile_coords(1, 1, 1));
        assert_ne!(a, b);
        assert_eq!(b.to_string(), "1:1:1");
    }

    #[test]
    fn test_world_to_tile_floors_negative_positions() {
        let config = TerrainConfig::default();
        assert_eq!(world_to_tile_coords(&config, 0.0, 0.0, 0), (0, 0));
        assert_eq!(world_to_tile_coords(&config, -0.1, 63.9, 0), (-1, 0));
        assert_eq!(world_to_tile_coords(&config, 128.0, -128.0, 1), (1, -1));
    }

    #[test]
    fn test_origin_and_size_scale_with_lod() {
        let config = TerrainConfig::default();
        let (x, z, size) = tile_world_origin(&config, tile_coords(-2, 3, 2));
        assert_eq!(size, 256.0);
        assert_eq!((x, z), (-512.0, 768.0));
        assert_eq!(tile_center(&config, tile_coords(0, 0, 0)), (32.0, 32.0));
    }

    #[test]
    fn test_children_partition_parent() {
        let config = TerrainConfig::default();
        let parent = tile_coords(-3, 5, 4);
        let (px, pz, psize) = tile_world_origin(&config, parent);

        let children = tile_children(parent);
        assert_eq!(children.len(), 4);
        let area: f64 = children
            .iter()
            .map(|c| tile_world_origin(&config, *c).2.powi(2))
            .sum();
        assert_eq!(area, psize * psize);

        for child in children {
            let (cx, cz, csize) = tile_world_origin(&config, child);
            assert!(cx >= px && cx + csize <= px + psize);
            assert!(cz >= pz && cz + csize <= pz + psize);
        }
        assert!(tile_children(tile_coords(0, 0, 0)).is_empty());
    }

    #[test]
    fn test_tiles_overlapping_small_rect() {
        let config = TerrainConfig::default();
        let aabb = create_aabb(-5.0, -5.0, 5.0, 5.0);
        let tiles = tiles_overlapping(&config, &aabb, 0);
        assert_eq!(tiles.len(), 4);
        assert!(tiles.contains(&tile_coords(-1, -1, 0)));
        assert!(tiles.contains(&tile_coords(0, 0, 0)));
    }

    #[test]
    fn test_tiles_overlapping_huge_rect_is_capped() {
        let config = TerrainConfig::default();
        let aabb = create_aabb(-1.0e9, -5.0, 1.0e9, 5.0);
        let tiles = tiles_overlapping(&config, &aabb, 0);
        assert_eq!(tiles.len(), 2 * MAX_OVERLAP_TILES_PER_AXIS as usize);
        assert!(tiles.contains(&tile_coords(0, 0, 0)));
        assert!(tiles.contains(&tile_coords(-1, -1, 0)));

        let (lo, hi) = (f64::NEG_INFINITY, f64::INFINITY);
        let tiles = tiles_overlapping(&config, &create_aabb(lo, lo, hi, hi), 3);
        let per_axis = MAX_OVERLAP_TILES_PER_AXIS as usize;
        assert_eq!(tiles.len(), per_axis * per_axis);
    }
}
