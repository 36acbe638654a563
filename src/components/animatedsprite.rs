//! Animated sprite component.
//!
//! An [`AnimatedSprite`] is an independently clocked view over a
//! [`CompiledAnimation`] owned by the
//! [`AssetRegistry`](crate::resources::assetregistry::AssetRegistry). Many
//! sprites can play the same animation; each keeps its own clock and frame
//! index, and none of them ever writes to the shared animation data.
//!
//! Animations loop forever. There is no "finished" state.

use std::sync::Arc;
use std::time::Duration;

use bevy_ecs::prelude::Component;

use crate::error::AtlasResult;
use crate::resources::assetregistry::{AssetRegistry, CompiledAnimation, CompiledFrame};

#[derive(Component, Debug, Clone)]
pub struct AnimatedSprite {
    animation: Arc<CompiledAnimation>,
    elapsed: Duration,
    frame_index: usize,
}

impl AnimatedSprite {
    /// Create a sprite playing the named animation from its first frame.
    pub fn new(registry: &AssetRegistry, animation: &str) -> AtlasResult<Self> {
        Ok(Self::from_animation(registry.lookup_animation(animation)?))
    }

    pub fn from_animation(animation: Arc<CompiledAnimation>) -> Self {
        Self {
            animation,
            elapsed: Duration::ZERO,
            frame_index: 0,
        }
    }

    /// Add `dt` to the sprite's clock and recompute the frame index.
    ///
    /// The index is a function of the accumulated time only: pausing (not
    /// calling `advance`) and resuming lands on the same frame as running
    /// continuously would.
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.frame_index = self.animation.frame_index_at(self.elapsed);
    }

    /// The frame to draw now.
    pub fn current_frame(&self) -> &CompiledFrame {
        &self.animation.frames()[self.frame_index]
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn animation(&self) -> &Arc<CompiledAnimation> {
        &self.animation
    }

    /// Restart from the first frame.
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.frame_index = 0;
    }
}
