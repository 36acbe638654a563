//! Gallery layout.
//!
//! Spawns one [`AnimatedSprite`] per animation, laid out in rows of
//! [`ViewerConfig::per_row`] slots. Used by the headless simulation and the
//! raylib viewer alike.

use bevy_ecs::prelude::*;

use crate::components::animatedsprite::AnimatedSprite;
use crate::components::mapposition::MapPosition;
use crate::error::AtlasResult;
use crate::resources::assetregistry::AssetRegistry;
use crate::resources::viewerconfig::ViewerConfig;

/// Spawn a sprite for each named animation, or for every registered
/// animation (sorted by name) when `names` is empty.
///
/// Fails without spawning anything if a name is unknown.
pub fn spawn_gallery(world: &mut World, names: &[String]) -> AtlasResult<Vec<Entity>> {
    let config = world.resource::<ViewerConfig>().clone();
    let sprites: Vec<AnimatedSprite> = {
        let registry = world.resource::<AssetRegistry>();
        if names.is_empty() {
            registry
                .animation_names()
                .into_iter()
                .map(|name| AnimatedSprite::new(registry, name))
                .collect::<AtlasResult<_>>()?
        } else {
            names
                .iter()
                .map(|name| AnimatedSprite::new(registry, name))
                .collect::<AtlasResult<_>>()?
        }
    };

    let entities = sprites
        .into_iter()
        .enumerate()
        .map(|(i, sprite)| {
            let (x, y) = config.slot_position(i);
            world.spawn((sprite, MapPosition::new(x, y))).id()
        })
        .collect();
    Ok(entities)
}
