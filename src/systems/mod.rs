//! ECS systems.
//!
//! Submodules overview
//! - [`animation`] – advance sprite animations from world time
//! - [`gallery`] – spawn one sprite per animation in a grid
//! - [`render`] – draw sprites with raylib (feature `viewer`)
//! - [`time`] – update [`crate::resources::worldtime::WorldTime`] once per tick

pub mod animation;
pub mod gallery;
#[cfg(feature = "viewer")]
pub mod render;
pub mod time;
