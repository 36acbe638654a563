//! Texture store for the raylib viewer.
//!
//! A non-send resource holding the spritesheet textures, keyed by the image
//! key recorded in each [`FrameRegion`](crate::resources::assetregistry::FrameRegion).
//! Textures are loaded through [`TextureLoader`], the raylib implementation
//! of [`ImageLoader`].
//!
//! Note: raylib textures must be used from the main thread only. Insert with
//! `insert_non_send_resource` and access via `NonSend`.

use std::path::Path;

use log::{debug, warn};
use raylib::prelude::*;
use rustc_hash::FxHashMap;

use crate::error::{AtlasError, AtlasResult};
use crate::geometry::Size;
use crate::loader::ImageLoader;

pub struct TextureStore {
    map: FxHashMap<String, Texture2D>,
}

impl Default for TextureStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureStore {
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Texture2D> {
        self.map.get(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Borrow the store together with the raylib handles needed to fill it.
    pub fn loader<'a>(
        &'a mut self,
        rl: &'a mut RaylibHandle,
        thread: &'a RaylibThread,
    ) -> TextureLoader<'a> {
        TextureLoader {
            store: self,
            rl,
            thread,
        }
    }
}

/// [`ImageLoader`] that decodes images into GPU textures.
pub struct TextureLoader<'a> {
    store: &'a mut TextureStore,
    rl: &'a mut RaylibHandle,
    thread: &'a RaylibThread,
}

impl ImageLoader for TextureLoader<'_> {
    fn load_image(&mut self, key: &str, path: &Path, declared: Size) -> AtlasResult<()> {
        if self.store.map.contains_key(key) {
            return Ok(());
        }
        let path_str = path.to_str().ok_or_else(|| AtlasError::Image {
            path: path.to_path_buf(),
            reason: "path is not valid UTF-8".to_string(),
        })?;
        let texture = self
            .rl
            .load_texture(self.thread, path_str)
            .map_err(|e| AtlasError::Image {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let actual = Size::new(texture.width, texture.height);
        if actual != declared {
            warn!(
                "Image {} is {} but its spritesheet declares {}",
                path.display(),
                actual,
                declared
            );
        }
        debug!("Loaded texture '{}' ({})", key, actual);
        self.store.map.insert(key.to_string(), texture);
        Ok(())
    }
}
