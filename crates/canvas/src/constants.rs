/// Default stroke width in pixels.
pub const DEFAULT_STROKE_WIDTH: f32 = 60.0;

/// Default touch slop in pixels (platform touch-sensitivity threshold).
pub const DEFAULT_TOUCH_SLOP: f32 = 8.0;

/// Default background color (white, opaque).
pub const BACKGROUND_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Default ink color (black, opaque).
pub const INK_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Maximum curve deviation when flattening quadratics to polylines.
pub const FLATTEN_TOLERANCE: f32 = 0.25;

/// Recursion cap for curve subdivision.
pub const MAX_FLATTEN_DEPTH: u32 = 16;

/// Stamp spacing as a fraction of the stroke radius.
pub const STAMP_SPACING_FRACTION: f32 = 0.25;

/// Lower bound on stamp spacing for very thin strokes.
pub const MIN_STAMP_SPACING: f32 = 0.5;
