//! Heightfield Operations - Pure functions for procedural elevation
//!
//! The stack runs in a fixed order, each stage consuming the previous
//! result: continental fBm, dynamic flattening, magnitude dip, ridge
//! erosion, trench re-addition, rolling hills. Dig subtraction and
//! vegetation hinting are layered on top by the world module.

use super::heightfield_data::{HeightfieldGenerator, Sample};
use super::noise_operations::{
    fbm, lerp, ridge_fbm, ridge_fbm_anisotropic, smoothstep, worley_distance,
};
use crate::constants::{erosion, noise as noise_consts, vegetation};
use noise::permutationtable::PermutationTable;
use noise::Perlin;

/// Create the generator with one noise stream per layer
pub fn create_heightfield_generator(seed: u32) -> HeightfieldGenerator {
    HeightfieldGenerator {
        seed,
        base: Perlin::new(seed.wrapping_add(noise_consts::SEED_BASE)),
        flatten: Perlin::new(seed.wrapping_add(noise_consts::SEED_FLATTEN)),
        erosion: Perlin::new(seed.wrapping_add(noise_consts::SEED_EROSION)),
        hills: Perlin::new(seed.wrapping_add(noise_consts::SEED_HILLS)),
        vegetation_ridge: Perlin::new(seed.wrapping_add(noise_consts::SEED_VEGETATION_RIDGE)),
        clump_cells: PermutationTable::new(seed.wrapping_add(noise_consts::SEED_VEGETATION_CELLS)),
    }
}

/// Pull values near zero toward a plateau. `k` in [0, 1] selects how hard.
///
/// Endpoints (0 and +-1) are fixed points for every `k`.
pub fn flatten_toward_plateau(n: f64, k: f64) -> f64 {
    let n = n.clamp(-1.0, 1.0);
    let exponent = lerp(
        1.0,
        noise_consts::FLATTEN_MAX_EXPONENT,
        smoothstep(0.0, 1.0, k.clamp(0.0, 1.0)),
    );
    n.signum() * n.abs().powf(exponent)
}

/// Attenuate magnitudes below the dip threshold, strongest halfway there
pub fn magnitude_dip(n: f64) -> f64 {
    let a = n.abs();
    if a >= noise_consts::DIP_THRESHOLD {
        return n;
    }
    let t = a / noise_consts::DIP_THRESHOLD;
    let bell = 4.0 * t * (1.0 - t);
    let reduction = noise_consts::DIP_STRENGTH * smoothstep(0.0, 1.0, bell);
    n * (1.0 - reduction)
}

/// Stages 1-3: continental height in meters before any erosion
pub fn base_height_raw(generator: &HeightfieldGenerator, x: f64, z: f64) -> f64 {
    let n = fbm(
        &generator.base,
        x,
        z,
        noise_consts::BASE_FREQUENCY,
        noise_consts::BASE_OCTAVES,
    );
    let k = 0.5
        + 0.5
            * fbm(
                &generator.flatten,
                x,
                z,
                noise_consts::FLATTEN_FREQUENCY,
                noise_consts::FLATTEN_OCTAVES,
            );

    magnitude_dip(flatten_toward_plateau(n, k)) * noise_consts::HEIGHT_SCALE
}

/// Sharpened ridge field in [0, 1]
pub fn ridge_strength(generator: &HeightfieldGenerator, x: f64, z: f64) -> f64 {
    ridge_fbm(
        &generator.erosion,
        x,
        z,
        erosion::RIDGE_FREQUENCY,
        erosion::RIDGE_OCTAVES,
    )
    .powf(erosion::RIDGE_SHARPNESS)
}

/// Stage 4: subtract valley strength, only at altitude
pub fn apply_ridge_erosion(height: f64, ridge: f64) -> f64 {
    let altitude = smoothstep(erosion::EROSION_START, erosion::EROSION_FULL, height);
    let valley = 1.0 - ridge;
    height - height * altitude * valley * erosion::VALLEY_STRENGTH
}

/// Stage 5: below sea level, ridges add relief back
pub fn apply_trench_relief(height: f64, ridge: f64) -> f64 {
    if height >= erosion::TRENCH_START {
        return height;
    }
    let depth = smoothstep(erosion::TRENCH_START, erosion::TRENCH_FULL, height);
    height + depth * ridge * ridge * erosion::TRENCH_AMPLITUDE
}

/// Band gate for the rolling hills, 1 inside [-10, 50] less the fades
pub fn hill_gate(height: f64) -> f64 {
    let enter = smoothstep(erosion::HILL_LOW, erosion::HILL_LOW + erosion::HILL_FADE, height);
    let leave = 1.0 - smoothstep(erosion::HILL_HIGH - erosion::HILL_FADE, erosion::HILL_HIGH, height);
    enter * leave
}

/// Stage 6: carve small rolling texture near sea level
pub fn apply_rolling_hills(generator: &HeightfieldGenerator, height: f64, x: f64, z: f64) -> f64 {
    let gate = hill_gate(height);
    if gate <= 0.0 {
        return height;
    }
    let hills = ridge_fbm(
        &generator.hills,
        x,
        z,
        erosion::HILL_FREQUENCY,
        erosion::HILL_OCTAVES,
    );
    height - gate * hills * erosion::HILL_AMPLITUDE
}

/// Full procedural elevation (stages 1-6), edits excluded
pub fn procedural_height(generator: &HeightfieldGenerator, x: f64, z: f64) -> f64 {
    let raw = base_height_raw(generator, x, z);
    let ridge = ridge_strength(generator, x, z);

    let eroded = apply_ridge_erosion(raw, ridge);
    let trenched = apply_trench_relief(eroded, ridge);
    apply_rolling_hills(generator, trenched, x, z)
}

/// Closeness to the nearest vegetation clump centre, 1 at the centre
pub fn clump_peak(generator: &HeightfieldGenerator, x: f64, z: f64) -> f64 {
    let d = worley_distance(&generator.clump_cells, x, z, vegetation::CLUMP_CELL_SIZE);
    1.0 - smoothstep(0.0, vegetation::CLUMP_RADIUS, d)
}

/// Anisotropic ridge field that moves the band edges
pub fn vegetation_ridge(generator: &HeightfieldGenerator, x: f64, z: f64) -> f64 {
    ridge_fbm_anisotropic(
        &generator.vegetation_ridge,
        x,
        z,
        vegetation::RIDGE_FREQUENCY_X,
        vegetation::RIDGE_FREQUENCY_Z,
        vegetation::RIDGE_OCTAVES,
    )
}

/// Vegetation eligibility window in [0, 1]
///
/// The band's low edge narrows and its high edge widens with `ridge_n`.
/// Steep ground fades the window out between the slope thresholds.
pub fn pine_window(base_height: f64, ridge_n: f64, slope: f64) -> f64 {
    let low = vegetation::BAND_LOW + vegetation::BAND_LOW_NARROW * ridge_n;
    let high = vegetation::BAND_HIGH + vegetation::BAND_HIGH_WIDEN * ridge_n;

    let enter = smoothstep(low, low + vegetation::BAND_FADE, base_height);
    let leave = 1.0 - smoothstep(high - vegetation::BAND_FADE, high, base_height);
    let steepness = 1.0
        - smoothstep(
            vegetation::SLOPE_FADE_START,
            vegetation::SLOPE_FADE_END,
            slope,
        );

    (enter * leave * steepness).clamp(0.0, 1.0)
}

/// Vegetation pseudo-height: the peak slides to the ground as the
/// window closes and never goes below it
pub fn pine_height(peak: f64, window: f64) -> f64 {
    let full = peak * vegetation::PINE_HEIGHT;
    (full - (1.0 - window) * vegetation::PINE_HEIGHT).max(0.0)
}

/// Assemble a sample from a base height and the local approximate slope
pub fn vegetation_sample(
    generator: &HeightfieldGenerator,
    x: f64,
    z: f64,
    base_height: f64,
    slope: f64,
) -> Sample {
    let window = pine_window(base_height, vegetation_ridge(generator, x, z), slope);
    let pine = if window > 0.0 {
        pine_height(clump_peak(generator, x, z), window)
    } else {
        0.0
    };

    Sample {
        height: base_height + pine,
        base_height,
        pine,
        pine_window: window,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_procedural_height_is_deterministic() {
        let a = create_heightfield_generator(1337);
        let b = create_heightfield_generator(1337);
        for i in 0..50 {
            let x = i as f64 * 731.7 - 12_000.0;
            let z = i as f64 * -377.1 + 4_000.0;
            let ha = procedural_height(&a, x, z);
            assert_eq!(ha.to_bits(), procedural_height(&b, x, z).to_bits());
            assert!(ha.is_finite());
        }
    }

    #[test]
    fn test_seeds_produce_different_terrain() {
        let a = create_heightfield_generator(1);
        let b = create_heightfield_generator(2);
        let differing = (0..20)
            .filter(|i| {
                let x = *i as f64 * 997.0;
                procedural_height(&a, x, -x) != procedural_height(&b, x, -x)
            })
            .count();
        assert!(differing > 15);
    }

    #[test]
    fn test_flatten_keeps_endpoints() {
        for k in [0.0, 0.3, 0.7, 1.0] {
            assert_eq!(flatten_toward_plateau(1.0, k), 1.0);
            assert_eq!(flatten_toward_plateau(-1.0, k), -1.0);
            assert_eq!(flatten_toward_plateau(0.0, k), 0.0);
        }
        // No flattening at k = 0, strong flattening at k = 1
        assert!((flatten_toward_plateau(0.4, 0.0) - 0.4).abs() < 1e-12);
        assert!(flatten_toward_plateau(0.4, 1.0) < 0.1);
    }

    #[test]
    fn test_magnitude_dip() {
        assert_eq!(magnitude_dip(0.5), 0.5);
        assert_eq!(magnitude_dip(-0.8), -0.8);
        assert_eq!(magnitude_dip(0.0), 0.0);
        let dipped = magnitude_dip(0.25);
        assert!((dipped - 0.25 * (1.0 - 0.68)).abs() < 1e-12, "dip was {}", dipped);
        assert!(magnitude_dip(-0.25) < 0.0);
    }

    #[test]
    fn test_erosion_only_bites_at_altitude() {
        assert_eq!(apply_ridge_erosion(5.0, 0.0), 5.0);
        assert_eq!(apply_ridge_erosion(-50.0, 0.0), -50.0);
        assert_eq!(apply_ridge_erosion(800.0, 1.0), 800.0);
        let eroded = apply_ridge_erosion(800.0, 0.0);
        assert!((eroded - 800.0 * 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_trench_relief_only_below_sea_level() {
        assert_eq!(apply_trench_relief(10.0, 1.0), 10.0);
        assert_eq!(apply_trench_relief(-600.0, 0.0), -600.0);
        assert!((apply_trench_relief(-600.0, 1.0) - (-300.0)).abs() < 1e-9);
    }

    #[test]
    fn test_hill_gate_band() {
        assert_eq!(hill_gate(-20.0), 0.0);
        assert_eq!(hill_gate(60.0), 0.0);
        assert_eq!(hill_gate(20.0), 1.0);
    }

    #[test]
    fn test_pine_window_outside_band_is_closed() {
        assert_eq!(pine_window(0.0, 0.5, 0.0), 0.0);
        assert_eq!(pine_window(200.0, 0.5, 0.0), 0.0);
        assert_eq!(pine_window(40.0, 0.0, 0.0), 1.0);
        // Steep ground closes the window
        assert_eq!(pine_window(40.0, 0.0, 0.45), 0.0);
        let partial = pine_window(40.0, 0.0, 0.35);
        assert!(partial > 0.0 && partial < 1.0);
    }

    #[test]
    fn test_pine_height_never_negative() {
        assert_eq!(pine_height(1.0, 1.0), 14.0);
        assert_eq!(pine_height(1.0, 0.0), 0.0);
        assert_eq!(pine_height(0.0, 1.0), 0.0);
        assert_eq!(pine_height(0.2, 0.1), 0.0);
    }

    #[test]
    fn test_vegetation_sample_stays_in_range() {
        let generator = create_heightfield_generator(1337);
        for i in 0..200 {
            let x = i as f64 * 1.37;
            let z = i as f64 * 0.91;
            let sample = vegetation_sample(&generator, x, z, 40.0, 0.05);
            assert!(sample.pine >= 0.0);
            assert!((0.0..=1.0).contains(&sample.pine_window));
            assert_eq!(sample.height, sample.base_height + sample.pine);
        }
        let dry = vegetation_sample(&generator, 3.0, 3.0, -100.0, 0.0);
        assert_eq!(dry.pine, 0.0);
        assert_eq!(dry.height, -100.0);
    }
}
