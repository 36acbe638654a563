//! Manifest orchestration.
//!
//! [`load`] walks the top-level manifest collection by collection. For each
//! one the spritesheet is loaded first and every frame region registered,
//! then each animation file is loaded, compiled against the frames registered
//! so far, and registered in turn. Frames from earlier collections are
//! visible to later ones; forward references are not retried.
//!
//! The first error aborts the whole load. Entries committed before the error
//! stay in the registry: a failed load should be treated as fatal.
//!
//! Decoding images is left to an [`ImageLoader`]; the registry only records
//! which image key and rectangle each frame refers to.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info};
use rustc_hash::FxHashMap;

use crate::error::{AtlasError, AtlasResult, KeyKind};
use crate::geometry::Size;
use crate::manifest::animation::AnimationManifest;
use crate::manifest::collection::{AssetCollection, Manifest};
use crate::manifest::spritesheet::SpriteSheetManifest;
use crate::resources::assetregistry::{AssetRegistry, CompiledAnimation, FrameRegion};

/// Backend side of image loading.
///
/// The orchestrator calls [`ImageLoader::load_image`] once per spritesheet,
/// before any of its frames are registered. Sub-images are then described by
/// the image key and a validated [`Rect`](crate::geometry::Rect).
pub trait ImageLoader {
    /// Make the image at `path` available under `key`. `declared` is the size
    /// the spritesheet claims the image has. Loading an already known key is
    /// a no-op.
    fn load_image(&mut self, key: &str, path: &Path, declared: Size) -> AtlasResult<()>;
}

/// An [`ImageLoader`] that records images without decoding them.
///
/// Declared sizes are trusted. Used for validation runs and tests.
#[derive(Debug, Default)]
pub struct HeadlessImages {
    images: FxHashMap<String, (PathBuf, Size)>,
}

impl HeadlessImages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&(PathBuf, Size)> {
        self.images.get(key)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl ImageLoader for HeadlessImages {
    fn load_image(&mut self, key: &str, path: &Path, declared: Size) -> AtlasResult<()> {
        self.images
            .entry(key.to_string())
            .or_insert_with(|| (path.to_path_buf(), declared));
        Ok(())
    }
}

/// Load every collection of the manifest at `path` into `registry`.
pub fn load(
    path: impl AsRef<Path>,
    registry: &mut AssetRegistry,
    images: &mut impl ImageLoader,
) -> AtlasResult<()> {
    let path = path.as_ref();
    let manifest = Manifest::load(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));

    for collection in &manifest.collections {
        info!("Loading collection '{}'", collection.name);
        load_collection(collection, base_dir, registry, images)
            .map_err(|e| e.with_context(format!("collection '{}'", collection.name)))?;
    }

    info!(
        "Loaded {} collection(s) from {}: {} frames, {} animations in registry",
        manifest.collections.len(),
        path.display(),
        registry.frame_count(),
        registry.animation_count()
    );
    Ok(())
}

fn load_collection(
    collection: &AssetCollection,
    base_dir: &Path,
    registry: &mut AssetRegistry,
    images: &mut impl ImageLoader,
) -> AtlasResult<()> {
    load_sprites(collection.spritesheet_path(base_dir), registry, images)?;
    for anim_path in collection.animation_paths(base_dir) {
        load_animations(anim_path, registry)?;
    }
    Ok(())
}

/// Load one spritesheet and register its frames. Returns the frame count.
pub fn load_sprites(
    path: impl AsRef<Path>,
    registry: &mut AssetRegistry,
    images: &mut impl ImageLoader,
) -> AtlasResult<usize> {
    let path = path.as_ref();
    info!("Loading sprites from {}", path.display());
    let sheet = SpriteSheetManifest::load(path)?;

    info!(
        "Loading spritesheet '{}' ({} frames)",
        sheet.meta.image,
        sheet.frames.len()
    );

    let image_path = sheet.image_path();
    let image_key: Arc<str> = Arc::from(image_path.to_string_lossy());
    images.load_image(&image_key, &image_path, sheet.meta.size)?;

    for frame in &sheet.frames {
        registry
            .register_frame(FrameRegion {
                key: frame.name.clone(),
                image: image_key.clone(),
                rect: frame.roi,
                pivot: frame.pivot,
            })
            .map_err(|e| e.with_context(format!("spritesheet '{}'", sheet.path.display())))?;
        debug!("Registered frame '{}' at {}", frame.name, frame.roi);
    }

    Ok(sheet.frames.len())
}

/// Load one animation file, compile and register its animations. Returns the
/// animation count.
pub fn load_animations(path: impl AsRef<Path>, registry: &mut AssetRegistry) -> AtlasResult<usize> {
    let path = path.as_ref();
    info!("Loading animations from {}", path.display());
    let manifest = AnimationManifest::load(path)?;
    let context = || format!("animation file '{}'", path.display());

    for desc in &manifest.anims {
        if registry.contains_animation(&desc.name) {
            return Err(AtlasError::DuplicateKey {
                kind: KeyKind::Animation,
                key: desc.name.clone(),
            }
            .with_context(context()));
        }
        let compiled = CompiledAnimation::compile(desc, registry, &manifest.path).map_err(|e| {
            e.with_context(format!("while loading animation '{}'", desc.name))
                .with_context(context())
        })?;
        registry
            .register_animation(compiled)
            .map_err(|e| e.with_context(context()))?;
        debug!(
            "Registered animation '{}' ({} frames @ {} fps)",
            desc.name,
            desc.frames.len(),
            desc.fps
        );
    }

    Ok(manifest.anims.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_images_keep_the_first_registration() {
        let mut images = HeadlessImages::new();
        images
            .load_image("a", Path::new("a.png"), Size::new(8, 8))
            .unwrap();
        images
            .load_image("a", Path::new("other.png"), Size::new(16, 16))
            .unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(
            images.get("a"),
            Some(&(PathBuf::from("a.png"), Size::new(8, 8)))
        );
    }

    #[test]
    fn missing_manifest_is_an_io_error() {
        let mut reg = AssetRegistry::new();
        let mut images = HeadlessImages::new();
        let err = load("does/not/exist/manifest.json", &mut reg, &mut images).unwrap_err();
        assert!(matches!(err, AtlasError::Io { .. }));
        assert_eq!(reg.frame_count(), 0);
    }
}
