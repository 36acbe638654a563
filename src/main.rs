//! Aberred Atlas command line.
//!
//! Loads a top-level sprite manifest and either prints the resulting catalog,
//! runs a fixed-step headless simulation of every animation, or (with the
//! `viewer` feature) shows them in a raylib window.
//!
//! # Running
//!
//! ```sh
//! cargo run -- assets/sprites/manifest.json --list
//! cargo run -- assets/sprites/manifest.json --simulate 2.5 --step 16
//! cargo run --features viewer -- assets/sprites/manifest.json --view
//! ```

use std::path::PathBuf;
use std::time::Duration;

use aberredatlas::components::animatedsprite::AnimatedSprite;
use aberredatlas::error::AtlasError;
use aberredatlas::loader::{self, HeadlessImages};
use aberredatlas::resources::assetregistry::AssetRegistry;
use aberredatlas::resources::viewerconfig::ViewerConfig;
use aberredatlas::resources::worldtime::WorldTime;
use aberredatlas::systems::animation::animation;
use aberredatlas::systems::gallery::spawn_gallery;
use aberredatlas::systems::time::update_world_time;
use bevy_ecs::prelude::*;
use clap::Parser;

/// Aberred Atlas: sprite manifest loader and animation player
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Top-level manifest. Overrides `[assets] manifest` from the config file.
    manifest: Option<PathBuf>,

    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Print every registered frame and animation. Implied without --simulate.
    #[arg(long)]
    list: bool,

    /// Simulate this many seconds of playback and print each sprite's frame.
    #[arg(long, value_name = "SECONDS")]
    simulate: Option<f32>,

    /// Simulation tick length in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 16)]
    step: u64,

    /// Only use these animations (repeatable). Defaults to all of them.
    #[arg(long = "anim", value_name = "NAME")]
    anims: Vec<String>,

    /// Open the raylib gallery window.
    #[cfg(feature = "viewer")]
    #[arg(long)]
    view: bool,
}

fn fail(err: &AtlasError) -> ! {
    log::error!("{err}");
    eprintln!("Error: {err}");
    std::process::exit(1);
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = ViewerConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::info!("{e}; using defaults");
    }
    if let Some(manifest) = cli.manifest.clone() {
        config.manifest = manifest;
    }

    #[cfg(feature = "viewer")]
    if cli.view {
        if let Err(e) = aberredatlas::viewer::run(config, &cli.anims) {
            fail(&e);
        }
        return;
    }

    let mut registry = AssetRegistry::new();
    let mut images = HeadlessImages::new();
    if let Err(e) = loader::load(&config.manifest, &mut registry, &mut images) {
        fail(&e);
    }

    if cli.list || cli.simulate.is_none() {
        print_catalog(&registry);
    }
    if let Some(seconds) = cli.simulate {
        simulate(registry, config, &cli.anims, seconds, cli.step);
    }
}

fn print_catalog(registry: &AssetRegistry) {
    println!("{} frames", registry.frame_count());
    for key in registry.frame_keys() {
        if let Ok(frame) = registry.lookup_frame(key) {
            println!("  {:<32} {} pivot {}  {}", key, frame.rect, frame.pivot, frame.image);
        }
    }
    println!("{} animations", registry.animation_count());
    for name in registry.animation_names() {
        if let Ok(anim) = registry.lookup_animation(name) {
            let keys: Vec<&str> = anim.frames().iter().map(|f| f.key()).collect();
            println!(
                "  {:<32} {:>3} fps  {}",
                name,
                anim.fps(),
                keys.join(" ")
            );
        }
    }
}

fn simulate(registry: AssetRegistry, config: ViewerConfig, anims: &[String], seconds: f32, step_ms: u64) {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(registry);
    world.insert_resource(config);
    if let Err(e) = spawn_gallery(&mut world, anims) {
        fail(&e);
    }

    let mut update = Schedule::default();
    update.add_systems(animation);

    let step = Duration::from_millis(step_ms.max(1));
    let ticks = (seconds.max(0.0) as f64 / step.as_secs_f64()).round() as u64;
    for _ in 0..ticks {
        update_world_time(&mut world, step.as_secs_f32());
        update.run(&mut world);
    }

    let time = *world.resource::<WorldTime>();
    println!(
        "{} ticks, {:.3}s simulated",
        time.frame_count,
        time.elapsed.as_secs_f64()
    );
    let mut query = world.query::<&AnimatedSprite>();
    for sprite in query.iter(&world) {
        println!(
            "  {:<32} frame {:>2}/{}  {}",
            sprite.animation().name(),
            sprite.frame_index(),
            sprite.animation().frame_count(),
            sprite.current_frame().key()
        );
    }
}
