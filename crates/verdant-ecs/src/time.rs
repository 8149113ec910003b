//! Time resource for the ECS world.

use bevy_ecs::prelude::*;

/// Global time resource inserted into the ECS world at creation.
///
/// Tracks frame delta, accumulated session time and the frame counter so
/// systems and scheduled tasks share one clock.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct TimeRes {
    /// Seconds elapsed since the previous frame.
    pub delta: f64,
    /// Seconds elapsed since the session started.
    pub elapsed: f64,
    /// Number of frames advanced so far.
    pub tick: u64,
}

impl TimeRes {
    /// Move the clock forward by one frame of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        let dt = dt.max(0.0);
        self.delta = dt;
        self.elapsed += dt;
        self.tick += 1;
    }
}
