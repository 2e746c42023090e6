//! Terrain tuning constants
//!
//! Grouped by the component that reads them. Heights are meters,
//! frequencies are cycles per meter.

/// Base heightfield noise
pub mod noise {
    /// Octaves of the continental fBm
    pub const BASE_OCTAVES: usize = 7;
    pub const BASE_FREQUENCY: f64 = 0.000_12;

    /// Flattening control field (`k`)
    pub const FLATTEN_OCTAVES: usize = 3;
    pub const FLATTEN_FREQUENCY: f64 = 0.000_08;
    /// Exponent applied near zero when flattening is fully engaged
    pub const FLATTEN_MAX_EXPONENT: f64 = 3.0;

    /// Magnitudes below this are attenuated by the dip
    pub const DIP_THRESHOLD: f64 = 0.5;
    /// Peak attenuation of the dip (reached at half the threshold)
    pub const DIP_STRENGTH: f64 = 0.68;

    /// Normalized height to meters
    pub const HEIGHT_SCALE: f64 = 1500.0;

    /// Per-stream seed offsets so every layer decorrelates from the others
    pub const SEED_BASE: u32 = 0;
    pub const SEED_FLATTEN: u32 = 1;
    pub const SEED_EROSION: u32 = 2;
    pub const SEED_HILLS: u32 = 3;
    pub const SEED_VEGETATION_RIDGE: u32 = 4;
    pub const SEED_VEGETATION_CELLS: u32 = 5;
}

/// Ridge erosion, trench re-addition and rolling hills
pub mod erosion {
    pub const RIDGE_OCTAVES: usize = 8;
    pub const RIDGE_FREQUENCY: f64 = 0.000_6;
    /// Sharpening exponent applied to the normalized ridge value
    pub const RIDGE_SHARPNESS: f64 = 1.5;
    /// Fraction of the height removed in a full valley
    pub const VALLEY_STRENGTH: f64 = 0.6;
    pub const EROSION_START: f64 = 10.0;
    pub const EROSION_FULL: f64 = 500.0;

    pub const TRENCH_START: f64 = 0.0;
    pub const TRENCH_FULL: f64 = -400.0;
    pub const TRENCH_AMPLITUDE: f64 = 300.0;

    pub const HILL_OCTAVES: usize = 9;
    pub const HILL_FREQUENCY: f64 = 0.004;
    pub const HILL_AMPLITUDE: f64 = 50.0;
    pub const HILL_LOW: f64 = -10.0;
    pub const HILL_HIGH: f64 = 50.0;
    /// Width of the fade at either end of the hill band
    pub const HILL_FADE: f64 = 15.0;
}

/// Vegetation hinting
pub mod vegetation {
    /// Spacing of the clump feature grid
    pub const CLUMP_CELL_SIZE: f64 = 9.0;
    /// Distance (in cells) at which a clump peak fades out
    pub const CLUMP_RADIUS: f64 = 0.45;
    pub const PINE_HEIGHT: f64 = 14.0;

    pub const BAND_LOW: f64 = 20.0;
    pub const BAND_HIGH: f64 = 60.0;
    /// How far the ridge field pulls the low edge up
    pub const BAND_LOW_NARROW: f64 = 10.0;
    /// How far the ridge field pushes the high edge up
    pub const BAND_HIGH_WIDEN: f64 = 15.0;
    pub const BAND_FADE: f64 = 8.0;

    pub const SLOPE_FADE_START: f64 = 0.3;
    pub const SLOPE_FADE_END: f64 = 0.4;

    pub const RIDGE_OCTAVES: usize = 3;
    pub const RIDGE_FREQUENCY_X: f64 = 0.02;
    pub const RIDGE_FREQUENCY_Z: f64 = 0.007;
}

/// Normals and the paged caches
pub mod cache {
    /// Central difference step for exact normals
    pub const NORMAL_EPSILON: f64 = 0.5;
    /// Grid spacing of both approximate caches
    pub const APPROX_GRID_SIZE: f64 = 4.0;
    pub const PAGE_BITS: u32 = 7;
    pub const PAGE_SIZE: usize = 1 << PAGE_BITS;
    pub const PAGE_MASK: i64 = (PAGE_SIZE as i64) - 1;
    pub const PAGE_CELLS: usize = PAGE_SIZE * PAGE_SIZE;
}

/// Dig edit layer
pub mod dig {
    pub const LAYER_COUNT: usize = 7;
    pub const BASE_CELL_SIZE: f64 = 0.5;
    /// Stamps rasterize at roughly radius / this many meters per cell
    pub const CELLS_PER_RADIUS: f64 = 6.0;
    /// Accumulated depths at or below this are not stored
    pub const EVICT_EPSILON: f64 = 1e-4;
    /// Larger stamps are clamped to this radius
    pub const MAX_DIG_RADIUS: f64 = 1024.0;
}

/// Quadtree
pub mod lod {
    /// Hard ceiling on max_lod so tile sizes stay representable
    pub const MAX_SUPPORTED_LOD: u32 = 24;
    pub const MAX_ROOT_WINDOW_RADIUS: u32 = 16;
    /// Per-axis ceiling on tiles returned for one rectangle
    pub const MAX_OVERLAP_TILES_PER_AXIS: i64 = 256;
}

/// Tile meshes
pub mod mesh {
    /// Guards for normalizing degenerate vectors
    pub const NORMAL_LENGTH_EPSILON: f64 = 1e-9;
}
