//! Shared configuration for digitink
//!
//! This crate provides the single source of truth for canvas dimensions,
//! paint style, and classifier settings shared between the library crates
//! and the replay binary.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default canvas width in pixels
pub const DEFAULT_CANVAS_WIDTH: u32 = 1080;

/// Default canvas height in pixels
pub const DEFAULT_CANVAS_HEIGHT: u32 = 1080;

/// Default touch slop in pixels (minimum displacement to register movement)
pub const DEFAULT_TOUCH_SLOP: f32 = 8.0;

/// Default stroke width in pixels
pub const DEFAULT_STROKE_WIDTH: f32 = 60.0;

/// Default model asset path, relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "assets/mnist.safetensors";

/// Canvas configuration for the drawing surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
    /// Minimum displacement between samples to register as movement
    pub touch_slop: f32,
    /// Stroke width in pixels
    pub stroke_width: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            touch_slop: DEFAULT_TOUCH_SLOP,
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

impl CanvasConfig {
    /// Create a new canvas config with the given dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Get width as f32 for calculations
    pub fn width_f32(&self) -> f32 {
        self.width as f32
    }

    /// Get height as f32 for calculations
    pub fn height_f32(&self) -> f32 {
        self.height as f32
    }
}

/// Paint style: ink and background colors as RGBA
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaintStyle {
    /// Foreground (ink) color
    pub ink: [f32; 4],
    /// Background color the surface is filled with
    pub background: [f32; 4],
}

impl Default for PaintStyle {
    fn default() -> Self {
        Self {
            ink: [0.0, 0.0, 0.0, 1.0],
            background: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

/// Classifier configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Path to the bundled model weights (safetensors)
    pub model_path: PathBuf,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub canvas: CanvasConfig,
    pub style: PaintStyle,
    pub classifier: ClassifierConfig,
}

impl AppConfig {
    /// Build a config from environment variables, falling back to defaults.
    ///
    /// - `DIGITINK_MODEL`: model weights path
    /// - `DIGITINK_CANVAS_SIZE`: canvas dimensions as `WIDTHxHEIGHT`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("DIGITINK_MODEL") {
            config.classifier.model_path = PathBuf::from(path);
        }

        if let Ok(size) = std::env::var("DIGITINK_CANVAS_SIZE")
            && let Some((width, height)) = parse_canvas_size(&size)
        {
            config.canvas.width = width;
            config.canvas.height = height;
        }

        config
    }
}

/// Parse a `WIDTHxHEIGHT` string, e.g. `1080x1920`
pub fn parse_canvas_size(value: &str) -> Option<(u32, u32)> {
    let (width, height) = value.split_once('x')?;
    let width = width.trim().parse().ok()?;
    let height = height.trim().parse().ok()?;
    if width == 0 || height == 0 {
        return None;
    }
    Some((width, height))
}
