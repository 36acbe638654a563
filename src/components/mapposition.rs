//! Screen placement of a sprite, in unscaled pixels.
//!
//! The frame's top-left corner is drawn at this position.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, PartialEq, Default)]
pub struct MapPosition {
    pub x: f32,
    pub y: f32,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
