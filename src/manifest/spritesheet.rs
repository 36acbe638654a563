//! Spritesheet manifest: named frame regions packed in a single image.
//!
//! ```json
//! {
//!   "frames": [
//!     { "filename": "walk_0", "frame": {"x": 0, "y": 0, "w": 16, "h": 16}, "pivot": {"x": 0.5, "y": 1.0} }
//!   ],
//!   "meta": { "image": "link.png", "size": {"w": 64, "h": 16} }
//! }
//! ```
//!
//! The image file is looked up next to the spritesheet manifest.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{AtlasError, AtlasResult};
use crate::geometry::{Pivot, Rect, Size};
use crate::manifest::{parse_json, read_json};

/// A parsed and validated spritesheet description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteSheetManifest {
    /// File name of the manifest.
    #[serde(skip)]
    pub name: String,
    /// Absolute path of the manifest.
    #[serde(skip)]
    pub path: PathBuf,
    pub frames: Vec<SheetFrame>,
    pub meta: SheetMeta,
}

/// A single sprite packed in the sheet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetFrame {
    #[serde(rename = "filename")]
    pub name: String,
    /// Area of the image holding the sprite.
    #[serde(rename = "frame")]
    pub roi: Rect,
    pub pivot: Pivot,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetMeta {
    /// Image file, relative to the spritesheet manifest.
    pub image: String,
    /// Declared image size.
    pub size: Size,
}

impl SpriteSheetManifest {
    /// Read, parse and check a spritesheet manifest.
    pub fn load(path: impl AsRef<Path>) -> AtlasResult<Self> {
        let path = path.as_ref();
        let mut sheet: SpriteSheetManifest = read_json(path)?;
        sheet.set_path(path)?;
        sheet.check()?;
        Ok(sheet)
    }

    /// Parse and check spritesheet text as if it had been read from `path`.
    pub fn from_json(path: impl AsRef<Path>, contents: &str) -> AtlasResult<Self> {
        let path = path.as_ref();
        let mut sheet: SpriteSheetManifest = parse_json(path, contents)?;
        sheet.set_path(path)?;
        sheet.check()?;
        Ok(sheet)
    }

    /// Set both the absolute path and the name of the spritesheet.
    pub fn set_path(&mut self, path: &Path) -> AtlasResult<()> {
        let abs = std::path::absolute(path).map_err(|source| AtlasError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.name = abs
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.path = abs;
        Ok(())
    }

    /// Full path of the image this sheet is cut from.
    pub fn image_path(&self) -> PathBuf {
        self.path
            .parent()
            .map(|dir| dir.join(&self.meta.image))
            .unwrap_or_else(|| PathBuf::from(&self.meta.image))
    }

    /// Validate the sheet. The first violation found is returned.
    ///
    /// Sheet-level checks come first (image, size), then each frame in order
    /// is checked for a name, a unique name, bounds, and pivot.
    pub fn check(&self) -> AtlasResult<()> {
        let entity = format!("spritesheet '{}'", self.name);
        if self.meta.image.is_empty() {
            return Err(AtlasError::validation(
                &self.path,
                entity,
                None,
                "isn't associated to an image file",
            ));
        }
        if !self.meta.size.is_valid() {
            return Err(AtlasError::validation(
                &self.path,
                entity,
                None,
                format!("has an invalid image size: {}", self.meta.size),
            ));
        }

        let mut seen = FxHashSet::default();
        for (i, f) in self.frames.iter().enumerate() {
            if f.name.is_empty() {
                return Err(AtlasError::validation(
                    &self.path,
                    format!("frame #{}", i),
                    Some(i),
                    "doesn't have a name",
                ));
            }
            let entity = format!("frame #{} ({})", i, f.name);
            if !seen.insert(f.name.as_str()) {
                return Err(AtlasError::validation(
                    &self.path,
                    entity,
                    Some(i),
                    "has the same name as an earlier frame",
                ));
            }
            if !f.roi.contains_within(self.meta.size) {
                return Err(AtlasError::validation(
                    &self.path,
                    entity,
                    Some(i),
                    format!(
                        "is out of image boundaries: {} in {}",
                        f.roi, self.meta.size
                    ),
                ));
            }
            if !f.pivot.is_valid() {
                return Err(AtlasError::validation(
                    &self.path,
                    entity,
                    Some(i),
                    format!("has an invalid pivot point: {}", f.pivot),
                ));
            }
        }
        Ok(())
    }
}
