//! Seeded one-dimensional noise used to perturb the baseline ground height.
//!
//! Composites a few octaves of simplex noise sampled along a line, then
//! normalizes the sum so that a sample never exceeds the requested scale.

use noise::{NoiseFn, Simplex};

/// A seeded, continuous pseudo-random function of horizontal position.
///
/// `sample(x, scale)` must be deterministic for a fixed seed, continuous in
/// `x`, and bounded by `scale` in absolute value.
pub trait NoiseField: Send + Sync {
    fn sample(&self, x: f32, scale: f32) -> f32;
}

/// Row of the 2D simplex lattice the 1D line is sampled along.
const LINE_Y: f64 = 0.5;

/// Fractal Brownian motion over simplex noise, bounded by the sample scale.
///
/// `scale` sets both the horizontal feature size (the first octave completes
/// roughly one cycle per `scale` units) and the vertical amplitude.
pub struct SimplexNoiseField {
    noise: Simplex,
    octaves: u32,
    lacunarity: f64,
    persistence: f64,
}

impl SimplexNoiseField {
    /// Create a field for the given seed with `octaves` octaves (at least one).
    pub fn new(seed: u64, octaves: u32) -> Self {
        Self {
            noise: Simplex::new(seed as u32),
            octaves: octaves.max(1),
            lacunarity: 2.0,
            persistence: 0.5,
        }
    }

    /// Sum of all octave amplitudes for a unit first octave.
    fn max_amplitude(&self) -> f64 {
        let mut sum = 0.0;
        let mut amp = 1.0;
        for _ in 0..self.octaves {
            sum += amp;
            amp *= self.persistence;
        }
        sum
    }
}

impl NoiseField for SimplexNoiseField {
    fn sample(&self, x: f32, scale: f32) -> f32 {
        if scale <= 0.0 {
            return 0.0;
        }
        let mut total = 0.0;
        let mut frequency = 1.0 / f64::from(scale);
        let mut amplitude = 1.0;

        for _ in 0..self.octaves {
            total += self.noise.get([f64::from(x) * frequency, LINE_Y]) * amplitude;
            frequency *= self.lacunarity;
            amplitude *= self.persistence;
        }

        let normalized = (total / self.max_amplitude()).clamp(-1.0, 1.0);
        (normalized * f64::from(scale)) as f32
    }
}

/// A field that is zero everywhere. Yields perfectly flat terrain.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatNoiseField;

impl NoiseField for FlatNoiseField {
    fn sample(&self, _x: f32, _scale: f32) -> f32 {
        0.0
    }
}
