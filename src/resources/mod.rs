//! ECS resources.
//!
//! Long-lived data inserted into the ECS world and read by systems.
//!
//! Overview
//! - `assetregistry` – frame regions and compiled animations, keyed by name
//! - `texturestore` – raylib spritesheet textures (feature `viewer`)
//! - `viewerconfig` – gallery and window settings loaded from INI
//! - `worldtime` – simulation time and delta
pub mod assetregistry;
#[cfg(feature = "viewer")]
pub mod texturestore;
pub mod viewerconfig;
pub mod worldtime;
