//! Simulation clock.
//!
//! Updated once per tick by [`update_world_time`](crate::systems::time::update_world_time)
//! and read by the animation system.

use std::time::Duration;

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Total scaled time since start.
    pub elapsed: Duration,
    /// Scaled time of the last tick.
    pub delta: Duration,
    /// Multiplier applied to every incoming delta. Zero pauses the world.
    pub time_scale: f32,
    /// Number of ticks so far.
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: Duration::ZERO,
            delta: Duration::ZERO,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }
}
