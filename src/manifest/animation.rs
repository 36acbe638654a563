//! Animation manifest: named frame sequences played at a fixed rate.
//!
//! ```json
//! {
//!   "spritesheet": "link.json",
//!   "animations": [
//!     { "name": "walk", "fps": 8, "frames": [ {"key": "walk_0", "flipH": false, "flipV": false} ] }
//!   ]
//! }
//! ```
//!
//! Frame keys are only checked for presence here. Resolving them against the
//! registered frames happens when the animation is compiled.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{AtlasError, AtlasResult};
use crate::manifest::{parse_json, read_json};

/// All the animations described by one file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationManifest {
    #[serde(skip)]
    pub path: PathBuf,
    /// Spritesheet the frames come from. Informational only.
    pub spritesheet: String,
    #[serde(rename = "animations")]
    pub anims: Vec<AnimationDesc>,
}

/// Name, speed and frames of one animation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationDesc {
    pub name: String,
    /// Frames per second. Zero means a static pose.
    pub fps: u32,
    pub frames: Vec<FrameSpec>,
}

/// Reference to a registered frame plus its transform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameSpec {
    pub key: String,
    #[serde(rename = "flipH")]
    pub flip_h: bool,
    #[serde(rename = "flipV")]
    pub flip_v: bool,
}

impl AnimationManifest {
    pub fn load(path: impl AsRef<Path>) -> AtlasResult<Self> {
        let path = path.as_ref();
        let mut manifest: AnimationManifest = read_json(path)?;
        manifest.path = path.to_path_buf();
        manifest.check()?;
        Ok(manifest)
    }

    pub fn from_json(path: impl AsRef<Path>, contents: &str) -> AtlasResult<Self> {
        let path = path.as_ref();
        let mut manifest: AnimationManifest = parse_json(path, contents)?;
        manifest.path = path.to_path_buf();
        manifest.check()?;
        Ok(manifest)
    }

    /// Validate every animation in declaration order.
    pub fn check(&self) -> AtlasResult<()> {
        let mut seen = FxHashSet::default();
        for (i, anim) in self.anims.iter().enumerate() {
            if anim.name.is_empty() {
                return Err(AtlasError::validation(
                    &self.path,
                    format!("anim #{}", i),
                    Some(i),
                    "doesn't have a name",
                ));
            }
            let entity = format!("anim #{} ({})", i, anim.name);
            if !seen.insert(anim.name.as_str()) {
                return Err(AtlasError::validation(
                    &self.path,
                    entity,
                    Some(i),
                    "has the same name as an earlier animation",
                ));
            }
            if anim.frames.is_empty() {
                return Err(AtlasError::validation(
                    &self.path,
                    entity,
                    Some(i),
                    "has no frames",
                ));
            }
            // A multi-frame animation at 0 fps is almost always an authoring mistake.
            if anim.fps == 0 && anim.frames.len() > 1 {
                return Err(AtlasError::validation(
                    &self.path,
                    entity,
                    Some(i),
                    format!(
                        "has {} frames but a null FPS (only static poses may have 0 fps)",
                        anim.frames.len()
                    ),
                ));
            }
            for (j, frame) in anim.frames.iter().enumerate() {
                if frame.key.is_empty() {
                    return Err(AtlasError::validation(
                        &self.path,
                        format!("frame #{} from anim #{} ({})", j, i, anim.name),
                        Some(i),
                        "has no key",
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(err: &AtlasError) -> String {
        match err {
            AtlasError::ManifestValidation { entity, reason, .. } => format!("{entity} {reason}"),
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn parses_animations_with_flip_flags() {
        let m = AnimationManifest::from_json(
            "anims.json",
            r#"{"spritesheet": "link.json", "animations": [
                {"name": "walk_left", "fps": 8, "frames": [
                    {"key": "walk_0", "flipH": true},
                    {"key": "walk_1", "flipH": true, "flipV": false}
                ]},
                {"name": "idle", "fps": 0, "frames": [{"key": "walk_0"}]}
            ]}"#,
        )
        .unwrap();

        assert_eq!(m.spritesheet, "link.json");
        assert_eq!(m.anims.len(), 2);
        assert_eq!(m.anims[0].fps, 8);
        assert_eq!(
            m.anims[0].frames[0],
            FrameSpec {
                key: "walk_0".into(),
                flip_h: true,
                flip_v: false
            }
        );
        assert_eq!(m.anims[1].fps, 0);
    }

    #[test]
    fn rejects_unnamed_animation() {
        let err = AnimationManifest::from_json(
            "anims.json",
            r#"{"animations": [{"fps": 1, "frames": [{"key": "a"}]}]}"#,
        )
        .unwrap_err();
        assert_eq!(reason(&err), "anim #0 doesn't have a name");
    }

    #[test]
    fn rejects_duplicate_names_within_a_file() {
        let err = AnimationManifest::from_json(
            "anims.json",
            r#"{"animations": [
                {"name": "walk", "fps": 1, "frames": [{"key": "a"}]},
                {"name": "walk", "fps": 1, "frames": [{"key": "b"}]}
            ]}"#,
        )
        .unwrap_err();
        assert!(reason(&err).starts_with("anim #1 (walk)"));
    }

    #[test]
    fn rejects_animation_without_frames() {
        let err = AnimationManifest::from_json(
            "anims.json",
            r#"{"animations": [{"name": "empty", "fps": 4, "frames": []}]}"#,
        )
        .unwrap_err();
        assert_eq!(reason(&err), "anim #0 (empty) has no frames");
    }

    #[test]
    fn rejects_zero_fps_with_several_frames() {
        let err = AnimationManifest::from_json(
            "anims.json",
            r#"{"animations": [{"name": "stuck", "fps": 0, "frames": [{"key": "a"}, {"key": "b"}]}]}"#,
        )
        .unwrap_err();
        assert!(reason(&err).contains("null FPS"));
    }

    #[test]
    fn accepts_zero_fps_static_pose() {
        let m = AnimationManifest::from_json(
            "anims.json",
            r#"{"animations": [{"name": "pose", "frames": [{"key": "a"}]}]}"#,
        )
        .unwrap();
        assert_eq!(m.anims[0].fps, 0);
    }

    #[test]
    fn rejects_frame_without_key() {
        let err = AnimationManifest::from_json(
            "anims.json",
            r#"{"animations": [{"name": "walk", "fps": 2, "frames": [{"key": "a"}, {"flipH": true}]}]}"#,
        )
        .unwrap_err();
        assert_eq!(reason(&err), "frame #1 from anim #0 (walk) has no key");
    }

    #[test]
    fn negative_fps_is_a_parse_error() {
        let err = AnimationManifest::from_json(
            "anims.json",
            r#"{"animations": [{"name": "walk", "fps": -3, "frames": [{"key": "a"}]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, AtlasError::ManifestParse { .. }));
    }
}
