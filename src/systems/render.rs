//! Raylib render pass for animated sprites.
//!
//! Each sprite's current frame is drawn from its spritesheet texture with the
//! frame rectangle as source. Flips mirror the frame in place: raylib flips a
//! source rectangle with a negative width or height without moving it.

use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::animatedsprite::AnimatedSprite;
use crate::components::mapposition::MapPosition;
use crate::resources::assetregistry::CompiledFrame;
use crate::resources::texturestore::TextureStore;
use crate::resources::viewerconfig::ViewerConfig;

/// Source and destination rectangles for drawing `frame` at `pos`.
pub fn frame_rects(frame: &CompiledFrame, pos: MapPosition, scale: f32) -> (Rectangle, Rectangle) {
    let (x, y, w, h) = frame.region.rect.xywh();
    let (w, h) = (w as f32, h as f32);
    let src = Rectangle {
        x: x as f32,
        y: y as f32,
        width: if frame.flip_h { -w } else { w },
        height: if frame.flip_v { -h } else { h },
    };
    let dest = Rectangle {
        x: pos.x * scale,
        y: pos.y * scale,
        width: w * scale,
        height: h * scale,
    };
    (src, dest)
}

/// Draw every positioned sprite. Sprites whose texture is missing are skipped.
pub fn render_pass(world: &mut World, d: &mut RaylibDrawHandle) {
    let scale = world.resource::<ViewerConfig>().scale as f32;
    let mut query = world.query::<(&AnimatedSprite, &MapPosition)>();
    let textures = world.non_send_resource::<TextureStore>();

    for (sprite, pos) in query.iter(world) {
        let frame = sprite.current_frame();
        if let Some(tex) = textures.get(&frame.region.image) {
            let (src, dest) = frame_rects(frame, *pos, scale);
            d.draw_texture_pro(tex, src, dest, Vector2 { x: 0.0, y: 0.0 }, 0.0, Color::WHITE);
        }
    }
}
