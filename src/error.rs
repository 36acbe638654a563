//! Error type shared by the manifest loaders, the registry and sprites.
//!
//! Loading is fail-fast: the first problem found is returned as an
//! [`AtlasError`] and nothing is retried. The orchestrator wraps errors in
//! [`AtlasError::Context`] so the message names the collection and file that
//! failed; [`AtlasError::root`] strips those wrappers again.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Which registry map a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    Frame,
    Animation,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyKind::Frame => write!(f, "frame"),
            KeyKind::Animation => write!(f, "animation"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AtlasError {
    /// A manifest file could not be read at all.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A manifest file is not well-formed JSON for its schema.
    #[error("failed to parse '{}': {source}", path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A manifest parsed but one of its entries breaks an invariant.
    #[error("'{}': {entity} {reason}", path.display())]
    ManifestValidation {
        path: PathBuf,
        /// Human readable description of the offending entry, e.g. `frame #2 (walk_2)`.
        entity: String,
        /// Position of the offending entry in its list, when there is one.
        index: Option<usize>,
        reason: String,
    },

    #[error("{kind} '{key}' already exists")]
    DuplicateKey { kind: KeyKind, key: String },

    #[error("frame #{frame_index} of animation '{animation}' references unknown frame '{key}'")]
    UnresolvedReference {
        animation: String,
        frame_index: usize,
        key: String,
    },

    #[error("unknown {kind} '{key}'")]
    Lookup { kind: KeyKind, key: String },

    /// The image backend refused to load a spritesheet image.
    #[error("failed to load image '{}': {reason}", path.display())]
    Image { path: PathBuf, reason: String },

    #[error("{context}: {error}")]
    Context {
        context: String,
        error: Box<AtlasError>,
    },
}

pub type AtlasResult<T> = Result<T, AtlasError>;

impl AtlasError {
    pub(crate) fn validation(
        path: &Path,
        entity: impl Into<String>,
        index: Option<usize>,
        reason: impl Into<String>,
    ) -> Self {
        AtlasError::ManifestValidation {
            path: path.to_path_buf(),
            entity: entity.into(),
            index,
            reason: reason.into(),
        }
    }

    /// Wrap the error with a description of where it happened.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        AtlasError::Context {
            context: context.into(),
            error: Box::new(self),
        }
    }

    /// The underlying error, with every [`AtlasError::Context`] layer removed.
    pub fn root(&self) -> &AtlasError {
        let mut current = self;
        while let AtlasError::Context { error, .. } = current {
            current = error;
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_strips_every_context_layer() {
        let err = AtlasError::Lookup {
            kind: KeyKind::Animation,
            key: "walk".to_string(),
        }
        .with_context("animation file 'a.json'")
        .with_context("collection 'link'");

        assert!(matches!(
            err.root(),
            AtlasError::Lookup { kind: KeyKind::Animation, key } if key == "walk"
        ));
    }

    #[test]
    fn context_messages_nest_outside_in() {
        let err = AtlasError::DuplicateKey {
            kind: KeyKind::Frame,
            key: "walk_0".to_string(),
        }
        .with_context("collection 'link'");

        assert_eq!(
            err.to_string(),
            "collection 'link': frame 'walk_0' already exists"
        );
    }

    #[test]
    fn validation_message_names_path_and_entity() {
        let err = AtlasError::validation(
            Path::new("sheet.json"),
            "frame #3 (walk_3)",
            Some(3),
            "is out of image boundaries",
        );
        assert_eq!(
            err.to_string(),
            "'sheet.json': frame #3 (walk_3) is out of image boundaries"
        );
    }
}
