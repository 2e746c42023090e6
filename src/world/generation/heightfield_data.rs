//! Heightfield Generator Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in heightfield_operations.rs

use noise::permutationtable::PermutationTable;
use noise::Perlin;

/// Seeded noise streams for every heightfield layer
///
/// Holds no state beyond the seeds; evaluation is a pure function of
/// (streams, x, z).
#[derive(Clone)]
pub struct HeightfieldGenerator {
    pub seed: u32,

    /// Continental fBm
    pub base: Perlin,

    /// Flattening control field `k`
    pub flatten: Perlin,

    /// Ridge erosion and trench shaping
    pub erosion: Perlin,

    /// Near sea level rolling hills
    pub hills: Perlin,

    /// Anisotropic band-edge modulation for vegetation
    pub vegetation_ridge: Perlin,

    /// Worley lattice placing vegetation clump centres
    pub clump_cells: PermutationTable,
}

/// One terrain query result
///
/// `height = base_height + pine`; `pine` is never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sample {
    pub height: f64,
    pub base_height: f64,
    pub pine: f64,
    pub pine_window: f64,
}
