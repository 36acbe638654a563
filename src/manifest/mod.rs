//! Manifest models and loaders.
//!
//! Three JSON formats describe the sprite assets:
//! - [`collection`] – the top-level manifest listing asset collections
//! - [`spritesheet`] – named frame regions packed in one image
//! - [`animation`] – named animations built from frame keys
//!
//! Each loader reads, parses and validates a single file. Nothing here touches
//! the [`AssetRegistry`](crate::resources::assetregistry::AssetRegistry);
//! wiring the files together is the job of [`crate::loader`].

pub mod animation;
pub mod collection;
pub mod spritesheet;

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{AtlasError, AtlasResult};

/// Read and deserialize a JSON manifest without validating it.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> AtlasResult<T> {
    let contents = std::fs::read_to_string(path).map_err(|source| AtlasError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_json(path, &contents)
}

/// Deserialize manifest text, attributing failures to `path`.
pub(crate) fn parse_json<T: DeserializeOwned>(path: &Path, contents: &str) -> AtlasResult<T> {
    serde_json::from_str(contents).map_err(|source| AtlasError::ManifestParse {
        path: path.to_path_buf(),
        source,
    })
}
