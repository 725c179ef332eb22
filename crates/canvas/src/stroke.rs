//! Touch-to-stroke pipeline
//!
//! This module connects:
//! - Touch input (`TouchEvent` or the explicit touch_* methods)
//! - The smoothed stroke path (quadratic per accepted sample)
//! - The paint target (anti-aliased disc stamps along the flattened curve)

use tracing::debug;

use crate::constants::{
    DEFAULT_TOUCH_SLOP, FLATTEN_TOLERANCE, MIN_STAMP_SPACING, STAMP_SPACING_FRACTION,
};
use crate::path::{QuadSegment, StrokePath};
use crate::surface::{PaintTarget, RasterSurface};
use crate::types::{StrokeStyle, TouchEvent};

/// Freehand drawing surface: accumulates smoothed strokes into a paint target.
///
/// Touch samples below the slop threshold are ignored to suppress micro-jitter
/// from finger tremor. Accepted samples extend the stroke path with a quadratic
/// whose control point is the previous committed point and whose endpoint is
/// the midpoint to the new point; the new segment is painted immediately.
pub struct StrokeSurface<T: PaintTarget = RasterSurface> {
    /// Paint target the strokes land on
    target: T,
    /// Path of the in-progress gesture
    path: StrokePath,
    /// Last committed point
    current: (f32, f32),
    /// Minimum per-axis displacement to register as movement
    touch_slop: f32,
    /// Fixed stroke style
    style: StrokeStyle,
    /// Background color used by clear
    background: [f32; 4],
}

impl StrokeSurface<RasterSurface> {
    /// Create a stroke surface backed by a CPU raster surface
    pub fn new(width: u32, height: u32, background: [f32; 4], style: StrokeStyle) -> Self {
        Self::with_target(RasterSurface::new(width, height, background), style, background)
    }

    /// The backing surface (mutates in place as strokes are painted)
    pub fn surface(&self) -> &RasterSurface {
        &self.target
    }
}

impl<T: PaintTarget> StrokeSurface<T> {
    /// Create a stroke surface over an arbitrary paint target
    pub fn with_target(target: T, style: StrokeStyle, background: [f32; 4]) -> Self {
        Self {
            target,
            path: StrokePath::new(),
            current: (0.0, 0.0),
            touch_slop: DEFAULT_TOUCH_SLOP,
            style,
            background,
        }
    }

    /// Override the touch slop (device-dependent)
    pub fn set_touch_slop(&mut self, slop: f32) {
        self.touch_slop = slop.max(0.0);
    }

    /// The current stroke style
    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    /// Dispatch a touch event to the matching handler
    pub fn handle(&mut self, event: TouchEvent) {
        match event {
            TouchEvent::Down { x, y } => self.touch_start(x, y),
            TouchEvent::Move { x, y } => self.touch_move(x, y),
            TouchEvent::Up => self.touch_end(),
        }
    }

    /// Begin a gesture at (x, y). No painting happens yet.
    pub fn touch_start(&mut self, x: f32, y: f32) {
        self.path.reset();
        self.path.move_to(x, y);
        self.current = (x, y);
    }

    /// Extend the gesture to (x, y).
    ///
    /// Samples within the slop threshold on both axes are dropped entirely;
    /// otherwise the path gains one smoothed quadratic segment which is painted
    /// onto the target immediately.
    pub fn touch_move(&mut self, x: f32, y: f32) {
        let dx = (x - self.current.0).abs();
        let dy = (y - self.current.1).abs();

        if dx < self.touch_slop && dy < self.touch_slop {
            return;
        }

        let mid_x = (x + self.current.0) / 2.0;
        let mid_y = (y + self.current.1) / 2.0;

        let Some(segment) = self.path.quad_to(self.current.0, self.current.1, mid_x, mid_y) else {
            // Move without a preceding down: treat it as the gesture start
            self.touch_start(x, y);
            return;
        };

        self.current = (x, y);
        self.paint_segment(&segment);
    }

    /// End the gesture. Painted content remains on the target.
    pub fn touch_end(&mut self) {
        self.path.reset();
    }

    /// True if a gesture's path currently holds segments
    pub fn has_active_path(&self) -> bool {
        !self.path.is_empty()
    }

    /// Reallocate the target, losing drawn content. In-progress stroke state
    /// (path and last committed point) is unaffected.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.target.resize(width, height);
    }

    /// Erase everything back to the background
    pub fn clear(&mut self) {
        self.target.fill(self.background);
    }

    /// Paint one segment: flatten to a polyline, then stamp discs along it
    fn paint_segment(&mut self, segment: &QuadSegment) {
        let mut points = Vec::new();
        segment.flatten_into(FLATTEN_TOLERANCE, &mut points);
        debug!(
            "StrokeSurface::paint_segment: ({:.1}, {:.1}) -> ({:.1}, {:.1}), {} polyline points",
            segment.from.0,
            segment.from.1,
            segment.to.0,
            segment.to.1,
            points.len()
        );
        stamp_polyline(&mut self.target, &points, self.style.radius(), self.style.ink);
    }
}

/// Stamp anti-aliased discs along a polyline at sub-radius spacing.
///
/// Disc stamping yields round caps and joins by construction; overlapping
/// stamps of the same solid color keep the interior solid.
pub(crate) fn stamp_polyline<T: PaintTarget>(
    target: &mut T,
    points: &[(f32, f32)],
    radius: f32,
    color: [f32; 4],
) {
    let Some(&(first_x, first_y)) = points.first() else {
        return;
    };
    target.stamp(first_x, first_y, radius, color);

    let spacing = (radius * STAMP_SPACING_FRACTION).max(MIN_STAMP_SPACING);
    let mut carry = 0.0;

    for pair in points.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        let dx = x1 - x0;
        let dy = y1 - y0;
        let length = (dx * dx + dy * dy).sqrt();
        if length <= f32::EPSILON {
            continue;
        }

        let mut dist = spacing - carry;
        if dist < 0.0 {
            dist = 0.0;
        }
        while dist <= length {
            let t = dist / length;
            target.stamp(x0 + dx * t, y0 + dy * t, radius, color);
            dist += spacing;
        }
        carry = length - (dist - spacing);
    }

    let (last_x, last_y) = points[points.len() - 1];
    target.stamp(last_x, last_y, radius, color);
}
