//! Sprite asset registry.
//!
//! Holds every frame region and compiled animation loaded so far, keyed by
//! name. Keys are unique across all loaded collections: registering a key a
//! second time fails instead of overwriting. Entries are immutable once
//! inserted and handed out as [`Arc`]s, so any number of sprites can share
//! them without locking. Registration takes `&mut self`, which serializes
//! writers.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::error::{AtlasError, AtlasResult, KeyKind};
use crate::geometry::{Pivot, Rect};
use crate::manifest::animation::AnimationDesc;

/// A named sub-image: a rectangle of a loaded source image.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRegion {
    pub key: String,
    /// Key of the source image in the image backend.
    pub image: Arc<str>,
    pub rect: Rect,
    pub pivot: Pivot,
}

/// A frame region as used by one animation frame.
#[derive(Debug, Clone)]
pub struct CompiledFrame {
    pub region: Arc<FrameRegion>,
    pub flip_h: bool,
    pub flip_v: bool,
}

impl CompiledFrame {
    pub fn key(&self) -> &str {
        &self.region.key
    }
}

/// A resolved animation, ready for time-driven frame selection.
///
/// Always holds at least one frame, and exactly one when `fps` is zero.
#[derive(Debug, Clone)]
pub struct CompiledAnimation {
    name: String,
    fps: u32,
    frames: SmallVec<[CompiledFrame; 8]>,
}

impl CompiledAnimation {
    /// Resolve every frame spec of `desc` against the frames in `registry`.
    ///
    /// `path` is the manifest the description came from, for error messages.
    pub fn compile(desc: &AnimationDesc, registry: &AssetRegistry, path: &Path) -> AtlasResult<Self> {
        let entity = format!("anim '{}'", desc.name);
        if desc.frames.is_empty() {
            return Err(AtlasError::validation(path, entity, None, "has no frames"));
        }
        if desc.fps == 0 && desc.frames.len() > 1 {
            return Err(AtlasError::validation(
                path,
                entity,
                None,
                "has several frames but a null FPS",
            ));
        }

        let frames = desc
            .frames
            .iter()
            .enumerate()
            .map(|(i, spec)| -> AtlasResult<CompiledFrame> {
                let region = registry.lookup_frame(&spec.key).map_err(|_| {
                    AtlasError::UnresolvedReference {
                        animation: desc.name.clone(),
                        frame_index: i,
                        key: spec.key.clone(),
                    }
                })?;
                Ok(CompiledFrame {
                    region,
                    flip_h: spec.flip_h,
                    flip_v: spec.flip_v,
                })
            })
            .collect::<AtlasResult<SmallVec<[CompiledFrame; 8]>>>()?;

        Ok(Self {
            name: desc.name.clone(),
            fps: desc.fps,
            frames,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn frames(&self) -> &[CompiledFrame] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// True for a single-pose animation that never changes frame.
    pub fn is_static(&self) -> bool {
        self.fps == 0
    }

    /// Index of the frame shown after `elapsed` time: `floor(t * fps) mod frames`.
    ///
    /// Computed on integer nanoseconds, so the result only depends on the
    /// total elapsed time and never on how it was split into ticks.
    pub fn frame_index_at(&self, elapsed: Duration) -> usize {
        if self.fps == 0 {
            return 0;
        }
        let ticks = elapsed.as_nanos() * self.fps as u128 / 1_000_000_000;
        (ticks % self.frames.len() as u128) as usize
    }
}

/// Central registry of frame regions and compiled animations.
#[derive(Resource, Debug, Default)]
pub struct AssetRegistry {
    frames: FxHashMap<String, Arc<FrameRegion>>,
    animations: FxHashMap<String, Arc<CompiledAnimation>>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a frame region under its own key.
    pub fn register_frame(&mut self, region: FrameRegion) -> AtlasResult<Arc<FrameRegion>> {
        if self.frames.contains_key(&region.key) {
            return Err(AtlasError::DuplicateKey {
                kind: KeyKind::Frame,
                key: region.key,
            });
        }
        let region = Arc::new(region);
        self.frames.insert(region.key.clone(), region.clone());
        Ok(region)
    }

    /// Register a compiled animation under its name.
    pub fn register_animation(
        &mut self,
        animation: CompiledAnimation,
    ) -> AtlasResult<Arc<CompiledAnimation>> {
        if self.animations.contains_key(&animation.name) {
            return Err(AtlasError::DuplicateKey {
                kind: KeyKind::Animation,
                key: animation.name,
            });
        }
        let animation = Arc::new(animation);
        self.animations
            .insert(animation.name.clone(), animation.clone());
        Ok(animation)
    }

    pub fn lookup_frame(&self, key: &str) -> AtlasResult<Arc<FrameRegion>> {
        self.frames
            .get(key)
            .cloned()
            .ok_or_else(|| AtlasError::Lookup {
                kind: KeyKind::Frame,
                key: key.to_string(),
            })
    }

    pub fn lookup_animation(&self, key: &str) -> AtlasResult<Arc<CompiledAnimation>> {
        self.animations
            .get(key)
            .cloned()
            .ok_or_else(|| AtlasError::Lookup {
                kind: KeyKind::Animation,
                key: key.to_string(),
            })
    }

    pub fn contains_frame(&self, key: &str) -> bool {
        self.frames.contains_key(key)
    }

    pub fn contains_animation(&self, key: &str) -> bool {
        self.animations.contains_key(key)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    /// Frame keys, sorted.
    pub fn frame_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.frames.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Animation names, sorted.
    pub fn animation_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.animations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Drop every entry. Sprites already holding an animation keep it alive.
    pub fn clear(&mut self) {
        self.frames.clear();
        self.animations.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::animation::FrameSpec;

    fn region(key: &str, x: i32) -> FrameRegion {
        FrameRegion {
            key: key.to_string(),
            image: Arc::from("link.png"),
            rect: Rect::new(x, 0, 16, 16),
            pivot: Pivot::new(0.5, 1.0),
        }
    }

    fn desc(name: &str, fps: u32, keys: &[&str]) -> AnimationDesc {
        AnimationDesc {
            name: name.to_string(),
            fps,
            frames: keys
                .iter()
                .map(|k| FrameSpec {
                    key: k.to_string(),
                    ..Default::default()
                })
                .collect(),
        }
    }

    fn walk_registry() -> AssetRegistry {
        let mut reg = AssetRegistry::new();
        for i in 0..4 {
            reg.register_frame(region(&format!("walk_{i}"), i * 16)).unwrap();
        }
        reg
    }

    fn walk(fps: u32) -> CompiledAnimation {
        let reg = walk_registry();
        CompiledAnimation::compile(
            &desc("walk", fps, &["walk_0", "walk_1", "walk_2", "walk_3"]),
            &reg,
            Path::new("anims.json"),
        )
        .unwrap()
    }

    #[test]
    fn duplicate_frame_key_is_rejected() {
        let mut reg = AssetRegistry::new();
        reg.register_frame(region("walk_0", 0)).unwrap();
        let err = reg.register_frame(region("walk_0", 16)).unwrap_err();
        assert!(matches!(
            err,
            AtlasError::DuplicateKey { kind: KeyKind::Frame, ref key } if key == "walk_0"
        ));
        // the original entry is untouched
        assert_eq!(reg.lookup_frame("walk_0").unwrap().rect.x, 0);
    }

    #[test]
    fn same_key_in_a_fresh_registry_succeeds() {
        let mut first = AssetRegistry::new();
        first.register_frame(region("walk_0", 0)).unwrap();
        let mut second = AssetRegistry::new();
        assert!(second.register_frame(region("walk_0", 0)).is_ok());
    }

    #[test]
    fn duplicate_animation_name_is_rejected() {
        let mut reg = walk_registry();
        let a = CompiledAnimation::compile(&desc("idle", 0, &["walk_0"]), &reg, Path::new("a.json"))
            .unwrap();
        let b = a.clone();
        reg.register_animation(a).unwrap();
        let err = reg.register_animation(b).unwrap_err();
        assert!(matches!(
            err,
            AtlasError::DuplicateKey { kind: KeyKind::Animation, .. }
        ));
    }

    #[test]
    fn unknown_keys_are_lookup_errors() {
        let reg = AssetRegistry::new();
        assert!(matches!(
            reg.lookup_frame("nope"),
            Err(AtlasError::Lookup { kind: KeyKind::Frame, .. })
        ));
        assert!(matches!(
            reg.lookup_animation("nope"),
            Err(AtlasError::Lookup { kind: KeyKind::Animation, .. })
        ));
    }

    #[test]
    fn compiled_frames_share_registered_regions() {
        let reg = walk_registry();
        let anim = CompiledAnimation::compile(
            &desc("walk", 8, &["walk_1", "walk_1"]),
            &reg,
            Path::new("a.json"),
        )
        .unwrap();
        let registered = reg.lookup_frame("walk_1").unwrap();
        assert!(Arc::ptr_eq(&anim.frames()[0].region, &registered));
        assert!(Arc::ptr_eq(&anim.frames()[1].region, &registered));
    }

    #[test]
    fn compile_keeps_flip_flags() {
        let reg = walk_registry();
        let mut d = desc("walk_left", 8, &["walk_0", "walk_1"]);
        d.frames[1].flip_h = true;
        d.frames[1].flip_v = true;
        let anim = CompiledAnimation::compile(&d, &reg, Path::new("a.json")).unwrap();
        assert!(!anim.frames()[0].flip_h);
        assert!(anim.frames()[1].flip_h && anim.frames()[1].flip_v);
    }

    #[test]
    fn compile_reports_unresolved_frame() {
        let reg = walk_registry();
        let err = CompiledAnimation::compile(
            &desc("walk", 8, &["walk_0", "run_0"]),
            &reg,
            Path::new("a.json"),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AtlasError::UnresolvedReference { ref animation, frame_index: 1, ref key }
                if animation == "walk" && key == "run_0"
        ));
    }

    #[test]
    fn compile_refuses_empty_or_ambiguous_descriptions() {
        let reg = walk_registry();
        assert!(CompiledAnimation::compile(&desc("e", 4, &[]), &reg, Path::new("a.json")).is_err());
        assert!(
            CompiledAnimation::compile(&desc("z", 0, &["walk_0", "walk_1"]), &reg, Path::new("a.json"))
                .is_err()
        );
    }

    #[test]
    fn frame_index_follows_elapsed_time() {
        let anim = CompiledAnimation::compile(
            &desc("walk", 10, &["walk_0", "walk_1", "walk_2", "walk_3"]),
            &walk_registry(),
            Path::new("a.json"),
        )
        .unwrap();
        assert_eq!(anim.frame_index_at(Duration::ZERO), 0);
        assert_eq!(anim.frame_index_at(Duration::from_millis(99)), 0);
        assert_eq!(anim.frame_index_at(Duration::from_millis(100)), 1);
        assert_eq!(anim.frame_index_at(Duration::from_millis(350)), 3);
        assert_eq!(anim.frame_index_at(Duration::from_millis(400)), 0);
        assert_eq!(anim.frame_index_at(Duration::from_secs(10) + Duration::from_millis(250)), 2);
    }

    #[test]
    fn static_pose_never_moves() {
        let reg = walk_registry();
        let anim = CompiledAnimation::compile(&desc("pose", 0, &["walk_2"]), &reg, Path::new("a.json"))
            .unwrap();
        assert!(anim.is_static());
        assert_eq!(anim.frame_index_at(Duration::from_secs(1000)), 0);
    }

    #[test]
    fn listings_are_sorted() {
        let mut reg = walk_registry();
        reg.register_animation(walk(8)).unwrap();
        assert_eq!(reg.frame_keys(), vec!["walk_0", "walk_1", "walk_2", "walk_3"]);
        assert_eq!(reg.animation_names(), vec!["walk"]);
        assert_eq!(reg.frame_count(), 4);
        assert_eq!(reg.animation_count(), 1);
    }

    #[test]
    fn clear_keeps_shared_animations_alive() {
        let mut reg = walk_registry();
        let held = reg.register_animation(walk(8)).unwrap();
        reg.clear();
        assert!(!reg.contains_animation("walk"));
        assert!(!reg.contains_frame("walk_0"));
        assert_eq!(held.frame_count(), 4);
        assert_eq!(held.frames()[3].key(), "walk_3");
    }
}
