//! Raylib sprite gallery.
//!
//! Opens a window, loads the manifest with textures, and plays every
//! animation side by side with real frame deltas until the window closes.

use bevy_ecs::prelude::*;
use log::info;
use raylib::prelude::*;

use crate::error::AtlasResult;
use crate::loader;
use crate::resources::assetregistry::AssetRegistry;
use crate::resources::texturestore::TextureStore;
use crate::resources::viewerconfig::ViewerConfig;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::animation;
use crate::systems::gallery::spawn_gallery;
use crate::systems::render::render_pass;
use crate::systems::time::update_world_time;

const BACKGROUND: Color = Color {
    r: 0x31,
    g: 0x8b,
    b: 0x6a,
    a: 0xff,
};

/// Run the gallery. `names` selects animations; empty shows all of them.
pub fn run(config: ViewerConfig, names: &[String]) -> AtlasResult<()> {
    let (mut rl, thread) = raylib::init()
        .size(config.window_width as i32, config.window_height as i32)
        .title("Aberred Atlas")
        .build();
    rl.set_target_fps(config.target_fps);

    // --------------- Assets ---------------
    let mut registry = AssetRegistry::new();
    let mut textures = TextureStore::new();
    loader::load(
        &config.manifest,
        &mut registry,
        &mut textures.loader(&mut rl, &thread),
    )?;
    info!(
        "{} textures, {} animations ready",
        textures.len(),
        registry.animation_count()
    );

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(registry);
    world.insert_resource(config);
    world.insert_non_send_resource(textures);
    spawn_gallery(&mut world, names)?;

    let mut update = Schedule::default();
    update.add_systems(animation);

    // --------------- Main loop ---------------
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        update_world_time(&mut world, dt);
        update.run(&mut world);

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(BACKGROUND);
        render_pass(&mut world, &mut d);
    }
    Ok(())
}
