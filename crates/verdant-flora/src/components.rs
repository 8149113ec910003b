//! Tree, leaf and fruit components.

use bevy_ecs::prelude::*;
use glam::Vec2;
use verdant_ecs::{Bounds, Fill, Tag};

/// A placed tree trunk.
///
/// Trees own no leaves or fruit. Those are sibling entities that merely sit
/// inside the tree's canopy square.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Tree {
    /// Grid-aligned left edge of the trunk.
    pub x: i32,
    /// Even trunk height.
    pub height: i32,
    /// Ground height under the trunk.
    pub ground: f32,
    /// Trunk width.
    pub width: i32,
}

impl Tree {
    /// Trunk rectangle, spanning `[ground - height, ground]` vertically.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(
            Vec2::new(self.x as f32, self.ground - self.height as f32),
            Vec2::new(self.width as f32, self.height as f32),
        )
    }
}

/// Parameters of the idle back-and-forth leaf animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwayParams {
    /// Angle range in degrees.
    pub angle: (f32, f32),
    /// Seconds for one direction of the oscillation.
    pub period: f32,
    /// Leaf width shrinks to this fraction of its size at the far end.
    pub size_factor: f32,
}

impl Default for SwayParams {
    fn default() -> Self {
        Self {
            angle: (-15.0, 15.0),
            period: 4.0,
            size_factor: 0.925,
        }
    }
}

/// Recorded start of a leaf's sway. The animator interpolates from it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwayStart {
    /// Session time the sway began.
    pub at: f64,
    pub angle: (f32, f32),
    /// Leaf side length at both ends of the size oscillation.
    pub size: (f32, f32),
    pub period: f32,
}

/// A leaf. `sway` stays `None` until its start delay has elapsed.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Leaf {
    pub sway: Option<SwayStart>,
}

/// A one-shot rotation from `from` to `to` degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationSweep {
    pub started_at: f64,
    pub from: f32,
    pub to: f32,
    pub duration: f32,
}

impl RotationSweep {
    pub fn is_finished(&self, now: f64) -> bool {
        now - self.started_at >= f64::from(self.duration)
    }
}

/// One-shot sweeps currently running on a leaf. Sweeps started while another
/// is running overlap rather than replace it.
#[derive(Component, Clone, Debug, Default, PartialEq)]
pub struct LeafMotion {
    pub sweeps: Vec<RotationSweep>,
}

/// Where a fruit is in its respawn cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FruitState {
    /// Full size and collectible.
    Visible,
    /// Zero size, waiting to respawn.
    Hidden,
}

/// A collectible fruit.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Fruit {
    /// Energy granted per collection.
    pub reward: f32,
    /// Seconds from collection to respawn.
    pub respawn_delay: f64,
    /// Side length while visible.
    pub full_size: f32,
    pub state: FruitState,
}

impl Fruit {
    pub fn new(reward: f32, respawn_delay: f64, full_size: f32) -> Self {
        Self {
            reward,
            respawn_delay,
            full_size,
            state: FruitState::Visible,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.state == FruitState::Visible
    }

    /// Visible to hidden. Returns the reward to grant, or `None` if the fruit
    /// was already hidden.
    pub fn on_collision(&mut self) -> Option<f32> {
        match self.state {
            FruitState::Visible => {
                self.state = FruitState::Hidden;
                Some(self.reward)
            }
            FruitState::Hidden => None,
        }
    }

    /// Hidden to visible. Returns `false` if the fruit was already visible.
    pub fn restore(&mut self) -> bool {
        match self.state {
            FruitState::Hidden => {
                self.state = FruitState::Visible;
                true
            }
            FruitState::Visible => false,
        }
    }
}

#[derive(Bundle)]
pub struct LeafBundle {
    pub tag: Tag,
    pub bounds: Bounds,
    pub fill: Fill,
    pub leaf: Leaf,
    pub motion: LeafMotion,
}

#[derive(Bundle)]
pub struct FruitBundle {
    pub tag: Tag,
    pub bounds: Bounds,
    pub fill: Fill,
    pub fruit: Fruit,
}
