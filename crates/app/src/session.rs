//! Sketch session - the glue between canvas and classifier
//!
//! Owns the stroke surface and a classifier backend as constructed
//! dependencies; nothing here reaches for globals.

use canvas::{StrokeStyle, StrokeSurface, TouchEvent};
use digitink_classifier::{ClassifierBackend, ClassifyError, DigitTensor};
use digitink_config::{CanvasConfig, PaintStyle};
use tracing::{debug, info};

/// One drawing-plus-classification session
pub struct SketchSession<B: ClassifierBackend> {
    surface: StrokeSurface,
    backend: B,
}

impl<B: ClassifierBackend> SketchSession<B> {
    /// Build a session from configuration and an already-constructed backend
    pub fn new(canvas: &CanvasConfig, style: &PaintStyle, backend: B) -> Self {
        let stroke_style = StrokeStyle {
            width: canvas.stroke_width,
            ink: style.ink,
        };
        let mut surface =
            StrokeSurface::new(canvas.width, canvas.height, style.background, stroke_style);
        surface.set_touch_slop(canvas.touch_slop);
        Self { surface, backend }
    }

    /// Feed one touch event into the canvas
    pub fn handle(&mut self, event: TouchEvent) {
        debug!("SketchSession::handle: {:?}", event);
        self.surface.handle(event);
    }

    /// Classify the current drawing, returning the predicted digit
    pub async fn classify(&mut self) -> Result<usize, ClassifyError> {
        let tensor = DigitTensor::from_surface(self.surface.surface())?;
        let scores = self.backend.classify(&tensor).await?;
        let digit = scores.top_class();
        info!("Prediction has been made: {digit}");
        Ok(digit)
    }

    /// Erase the drawing back to the background
    pub fn clear(&mut self) {
        self.surface.clear();
    }

    /// The underlying stroke surface
    pub fn surface(&self) -> &StrokeSurface {
        &self.surface
    }
}
