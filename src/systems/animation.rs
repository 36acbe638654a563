//! Animation system.
//!
//! [`animation`] advances every [`AnimatedSprite`] by the tick's scaled delta.
//! Each sprite owns its clock, so the order in which they are visited does
//! not matter.

use bevy_ecs::prelude::*;

use crate::components::animatedsprite::AnimatedSprite;
use crate::resources::worldtime::WorldTime;

/// Advance sprite animations by [`WorldTime::delta`].
pub fn animation(mut query: Query<&mut AnimatedSprite>, time: Res<WorldTime>) {
    for mut sprite in query.iter_mut() {
        sprite.advance(time.delta);
    }
}
