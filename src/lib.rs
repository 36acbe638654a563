//! Aberred Atlas library.
//!
//! Turns JSON sprite manifests into a registry of frame regions and compiled
//! animations, and drives per-sprite frame selection from elapsed time.
//!
//! - [`manifest`] – collection, spritesheet and animation manifest loaders
//! - [`loader`] – walks a top-level manifest into an [`AssetRegistry`](resources::assetregistry::AssetRegistry)
//! - [`components`] – the [`AnimatedSprite`](components::animatedsprite::AnimatedSprite) instance
//! - [`resources`] – registry, clock and configuration
//! - [`systems`] – ECS systems advancing and drawing sprites

pub mod components;
pub mod error;
pub mod geometry;
pub mod loader;
pub mod manifest;
pub mod resources;
pub mod systems;
#[cfg(feature = "viewer")]
pub mod viewer;
