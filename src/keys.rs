//! Packed integer keys for sparse 2D maps
//!
//! Two signed 32-bit grid coordinates share one u64 so the maps hash a
//! single integer instead of a tuple or a formatted string.

/// Pack two signed grid coordinates into one key
#[inline]
pub fn pack_cell_key(ix: i32, iz: i32) -> u64 {
    ((ix as u32 as u64) << 32) | (iz as u32 as u64)
}

/// Inverse of [`pack_cell_key`]
#[inline]
pub fn unpack_cell_key(key: u64) -> (i32, i32) {
    ((key >> 32) as u32 as i32, key as u32 as i32)
}

/// Clamp an i64 grid coordinate into the packable range
#[inline]
pub fn clamp_to_i32(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
