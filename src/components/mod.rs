//! ECS components for sprite entities.
//!
//! Submodules overview:
//! - [`animatedsprite`] – per-entity animation clock and current frame
//! - [`mapposition`] – where the sprite is drawn

pub mod animatedsprite;
pub mod mapposition;
