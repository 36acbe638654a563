//! Viewer configuration resource.
//!
//! Settings for the sprite gallery (both the headless simulation and the
//! raylib window), loaded from an INI file. Missing files or keys keep the
//! defaults.
//!
//! # Configuration File Format
//!
//! ```ini
//! [assets]
//! manifest = assets/sprites/manifest.json
//!
//! [window]
//! width = 640
//! height = 640
//! scale = 4
//! target_fps = 60
//!
//! [layout]
//! per_row = 8
//! cell = 16
//! margin_x = 16
//! margin_y = 24
//! ```

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;

const DEFAULT_MANIFEST_PATH: &str = "assets/sprites/manifest.json";
const DEFAULT_WINDOW_WIDTH: u32 = 640;
const DEFAULT_WINDOW_HEIGHT: u32 = 640;
const DEFAULT_SCALE: u32 = 4;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_PER_ROW: u32 = 8;
const DEFAULT_CELL: u32 = 16;
const DEFAULT_MARGIN_X: u32 = 16;
const DEFAULT_MARGIN_Y: u32 = 24;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Top-level asset manifest to load.
    pub manifest: PathBuf,
    pub window_width: u32,
    pub window_height: u32,
    /// Pixel zoom applied when drawing.
    pub scale: u32,
    pub target_fps: u32,
    /// Sprites per gallery row.
    pub per_row: u32,
    /// Gallery cell size in unscaled pixels.
    pub cell: u32,
    pub margin_x: u32,
    pub margin_y: u32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewerConfig {
    pub fn new() -> Self {
        Self {
            manifest: PathBuf::from(DEFAULT_MANIFEST_PATH),
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            scale: DEFAULT_SCALE,
            target_fps: DEFAULT_TARGET_FPS,
            per_row: DEFAULT_PER_ROW,
            cell: DEFAULT_CELL,
            margin_x: DEFAULT_MARGIN_X,
            margin_y: DEFAULT_MARGIN_Y,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file at `config_path`.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);
        info!(
            "Loaded config: manifest={}, {}x{} window, scale={}, fps={}, {} per row",
            self.manifest.display(),
            self.window_width,
            self.window_height,
            self.scale,
            self.target_fps,
            self.per_row
        );
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [assets] section
        if let Some(manifest) = config.get("assets", "manifest") {
            self.manifest = PathBuf::from(manifest);
        }

        // [window] section
        let uint = |section: &str, key: &str| {
            config
                .getuint(section, key)
                .ok()
                .flatten()
                .map(|v| v as u32)
        };
        if let Some(width) = uint("window", "width") {
            self.window_width = width;
        }
        if let Some(height) = uint("window", "height") {
            self.window_height = height;
        }
        if let Some(scale) = uint("window", "scale") {
            self.scale = scale.max(1);
        }
        if let Some(fps) = uint("window", "target_fps") {
            self.target_fps = fps;
        }

        // [layout] section
        if let Some(per_row) = uint("layout", "per_row") {
            self.per_row = per_row.max(1);
        }
        if let Some(cell) = uint("layout", "cell") {
            self.cell = cell;
        }
        if let Some(margin_x) = uint("layout", "margin_x") {
            self.margin_x = margin_x;
        }
        if let Some(margin_y) = uint("layout", "margin_y") {
            self.margin_y = margin_y;
        }
    }

    /// Unscaled top-left position of gallery slot `index`.
    pub fn slot_position(&self, index: usize) -> (f32, f32) {
        let per_row = self.per_row.max(1) as usize;
        let col = (index % per_row) as f32;
        let row = (index / per_row) as f32;
        (
            self.margin_x as f32 + self.cell as f32 * col,
            self.margin_y as f32 + self.cell as f32 * row,
        )
    }
}
