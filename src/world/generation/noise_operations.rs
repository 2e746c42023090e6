//! Noise composition primitives - Pure functions
//!
//! Octave summation over seeded gradient noise, the ridge transform and
//! the easing helpers every terrain layer shares.

use noise::core::worley::{distance_functions, worley_2d, ReturnType};
use noise::permutationtable::PermutationTable;
use noise::{NoiseFn, Perlin};

/// Lattice coordinates past this magnitude are answered with 0
const MAX_LATTICE_COORD: f64 = 1.0e15;

#[inline]
fn lattice_point_in_range(u: f64, v: f64) -> bool {
    u.abs() < MAX_LATTICE_COORD && v.abs() < MAX_LATTICE_COORD
}

/// One Perlin read. Non-finite or astronomically far points read as 0.
#[inline]
pub fn sample_perlin(noise: &Perlin, u: f64, v: f64) -> f64 {
    if !lattice_point_in_range(u, v) {
        return 0.0;
    }
    noise.get([u, v])
}

/// Hermite smoothstep between two edges. Edges may be given in either
/// order; equal edges act as a hard step.
#[inline]
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    if edge0 == edge1 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Ridge transform: 1 on zero crossings, 0 at the extremes
#[inline]
pub fn ridge(n: f64) -> f64 {
    let r = 1.0 - n.clamp(-1.0, 1.0).abs();
    r * r
}

/// Per-octave domain offset. Keeps octaves off the integer lattice where
/// gradient noise is exactly zero, and decorrelates them from each other.
#[inline]
fn octave_offset(octave: usize) -> (f64, f64) {
    let o = octave as f64;
    (o * 17.137 + 0.318, o * 31.791 + 0.719)
}

/// Normalized fractal Brownian motion in roughly [-1, 1]
///
/// Each octave halves amplitude and doubles frequency.
pub fn fbm(noise: &Perlin, x: f64, z: f64, frequency: f64, octaves: usize) -> f64 {
    fbm_anisotropic(noise, x, z, frequency, frequency, octaves)
}

/// [`fbm`] with independent frequencies per axis
pub fn fbm_anisotropic(
    noise: &Perlin,
    x: f64,
    z: f64,
    frequency_x: f64,
    frequency_z: f64,
    octaves: usize,
) -> f64 {
    let mut sum = 0.0;
    let mut total = 0.0;
    let mut amplitude = 1.0;
    let mut scale = 1.0;

    for octave in 0..octaves {
        let (ox, oz) = octave_offset(octave);
        let n = sample_perlin(noise, x * frequency_x * scale + ox, z * frequency_z * scale + oz);
        sum += amplitude * n;
        total += amplitude;
        amplitude *= 0.5;
        scale *= 2.0;
    }

    if total <= f64::EPSILON {
        return 0.0;
    }
    (sum / total).clamp(-1.0, 1.0)
}

/// Octave sum of [`ridge`]-transformed noise, normalized to [0, 1]
pub fn ridge_fbm(noise: &Perlin, x: f64, z: f64, frequency: f64, octaves: usize) -> f64 {
    ridge_fbm_anisotropic(noise, x, z, frequency, frequency, octaves)
}

/// [`ridge_fbm`] with independent frequencies per axis
pub fn ridge_fbm_anisotropic(
    noise: &Perlin,
    x: f64,
    z: f64,
    frequency_x: f64,
    frequency_z: f64,
    octaves: usize,
) -> f64 {
    let mut sum = 0.0;
    let mut total = 0.0;
    let mut amplitude = 1.0;
    let mut scale = 1.0;

    for octave in 0..octaves {
        let (ox, oz) = octave_offset(octave);
        let n = sample_perlin(noise, x * frequency_x * scale + ox, z * frequency_z * scale + oz);
        sum += amplitude * ridge(n);
        total += amplitude;
        amplitude *= 0.5;
        scale *= 2.0;
    }

    if total <= f64::EPSILON {
        return 0.0;
    }
    (sum / total).clamp(0.0, 1.0)
}

/// Distance (in cell units) from a point to the nearest Worley feature
/// point, one feature point per `cell_size` square
pub fn worley_distance(cells: &PermutationTable, x: f64, z: f64, cell_size: f64) -> f64 {
    let (u, v) = (x / cell_size, z / cell_size);
    if !lattice_point_in_range(u, v) {
        return 0.0;
    }
    // Distance comes back remapped as d * 2 - 1
    let remapped = worley_2d(cells, distance_functions::euclidean, ReturnType::Distance, [u, v]);
    ((remapped + 1.0) * 0.5).max(0.0)
}
