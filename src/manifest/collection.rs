//! Top-level asset manifest.
//!
//! ```json
//! {
//!   "collections": [
//!     { "name": "link", "spritesheet": "link.json", "animations": ["link_anims.json"] }
//!   ]
//! }
//! ```
//!
//! Paths inside a collection are relative to the manifest's own directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AtlasError, AtlasResult};
use crate::manifest::{parse_json, read_json};

/// The whole set of sprite assets, grouped into collections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub collections: Vec<AssetCollection>,
}

/// One spritesheet together with the animation files built on its frames.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetCollection {
    pub name: String,
    pub spritesheet: String,
    pub animations: Vec<String>,
}

impl AssetCollection {
    /// Spritesheet manifest path, resolved against `base_dir`.
    pub fn spritesheet_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.spritesheet)
    }

    /// Animation manifest paths, resolved against `base_dir`, in declaration order.
    pub fn animation_paths<'a>(&'a self, base_dir: &'a Path) -> impl Iterator<Item = PathBuf> + 'a {
        self.animations.iter().map(move |a| base_dir.join(a))
    }
}

impl Manifest {
    /// Read, parse and check a manifest file.
    pub fn load(path: impl AsRef<Path>) -> AtlasResult<Self> {
        let path = path.as_ref();
        let manifest: Manifest = read_json(path)?;
        manifest.check(path)?;
        Ok(manifest)
    }

    /// Parse and check manifest text. `path` is only used in error messages.
    pub fn from_json(path: impl AsRef<Path>, contents: &str) -> AtlasResult<Self> {
        let path = path.as_ref();
        let manifest: Manifest = parse_json(path, contents)?;
        manifest.check(path)?;
        Ok(manifest)
    }

    /// Every collection needs a name, a spritesheet and at least one animation file.
    pub fn check(&self, path: &Path) -> AtlasResult<()> {
        for (i, c) in self.collections.iter().enumerate() {
            if c.name.is_empty() {
                return Err(AtlasError::validation(
                    path,
                    format!("collection #{}", i),
                    Some(i),
                    "doesn't have a name",
                ));
            }
            let entity = format!("collection #{} ({})", i, c.name);
            if c.spritesheet.is_empty() {
                return Err(AtlasError::validation(
                    path,
                    entity,
                    Some(i),
                    "doesn't have an associated spritesheet",
                ));
            }
            if c.animations.is_empty() {
                return Err(AtlasError::validation(
                    path,
                    entity,
                    Some(i),
                    "doesn't have any associated animations",
                ));
            }
        }
        Ok(())
    }
}
