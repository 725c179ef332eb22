use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_STROKE_WIDTH, INK_COLOR};

/// Touch input events, one per pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TouchEvent {
    /// Finger down: starts a new stroke at (x, y)
    Down { x: f32, y: f32 },
    /// Finger moved to (x, y)
    Move { x: f32, y: f32 },
    /// Finger lifted: ends the stroke
    Up,
}

/// Fixed stroke style applied to every painted segment
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke width (diameter) in pixels
    pub width: f32,
    /// Solid foreground color
    pub ink: [f32; 4],
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: DEFAULT_STROKE_WIDTH,
            ink: INK_COLOR,
        }
    }
}

impl StrokeStyle {
    /// Create a style with the given width, keeping the default ink color
    pub fn with_width(width: f32) -> Self {
        Self {
            width: width.max(1.0),
            ..Default::default()
        }
    }

    /// Stroke radius in pixels
    pub fn radius(&self) -> f32 {
        self.width / 2.0
    }
}
