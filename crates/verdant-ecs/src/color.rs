//! Colors and cosmetic color variance.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// An 8-bit RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const ORANGE: Self = Self::rgb(255, 200, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Base ground color, perturbed per block.
    pub const GROUND: Self = Self::rgb(212, 123, 74);
    /// Canonical trunk color.
    pub const TRUNK: Self = Self::rgb(100, 50, 20);
    /// Base leaf color.
    pub const LEAF: Self = Self::rgb(50, 200, 30);

    /// Opaque color from red, green and blue channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Fixed palette fruit is repainted from on every appearance pass.
pub const FRUIT_PALETTE: [Color; 3] = [Color::RED, Color::YELLOW, Color::ORANGE];

/// Produces colors in the neighborhood of a base color.
pub trait ColorVariance: Send + Sync {
    /// A color close to `base`, drawn from `rng`.
    fn approximate(&self, base: Color, rng: &mut dyn RngCore) -> Color;
}

/// Shifts each RGB channel by a uniform integer in `[-delta, +delta]`,
/// clamped to the valid channel range. Alpha is kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorJitter {
    pub delta: u8,
}

impl ColorJitter {
    pub const fn new(delta: u8) -> Self {
        Self { delta }
    }

    fn jitter_channel(&self, channel: u8, rng: &mut dyn RngCore) -> u8 {
        let delta = i16::from(self.delta);
        let shifted = i16::from(channel) + rng.random_range(-delta..=delta);
        shifted.clamp(0, 255) as u8
    }
}

impl Default for ColorJitter {
    fn default() -> Self {
        Self::new(10)
    }
}

impl ColorVariance for ColorJitter {
    fn approximate(&self, base: Color, rng: &mut dyn RngCore) -> Color {
        Color {
            r: self.jitter_channel(base.r, rng),
            g: self.jitter_channel(base.g, rng),
            b: self.jitter_channel(base.b, rng),
            a: base.a,
        }
    }
}
