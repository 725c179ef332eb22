//! digitink canvas - freehand stroke capture and rendering
//!
//! This crate provides the drawing-surface core:
//! - [`surface::RasterSurface`] - CPU RGBA surface backing the drawing
//! - [`surface::PaintTarget`] - capability trait the stroke pipeline paints through
//! - [`path::StrokePath`] - smoothed quadratic stroke path
//! - [`stroke::StrokeSurface`] - touch-to-stroke pipeline with jitter suppression

pub mod constants;
pub mod path;
pub mod stroke;
pub mod surface;
pub mod types;

pub use constants::*;
pub use path::*;
pub use stroke::*;
pub use surface::*;
pub use types::*;
