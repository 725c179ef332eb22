//! Digit classification for digitink
//!
//! Turns the canvas raster into a 28x28 single-channel tensor and runs a
//! bundled pre-trained model over it on a blocking worker.

mod model;
mod preprocess;

pub use model::{DigitModel, LocalClassifier};
pub use preprocess::{DigitTensor, IMAGE_PIXELS, IMAGE_SIDE};

use thiserror::Error;

/// Number of digit classes
pub const CLASS_COUNT: usize = 10;

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("Failed to load model: {0}")]
    ModelLoad(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Invalid input: expected {expected} values, got {actual}")]
    InvalidInput { expected: usize, actual: usize },

    #[error("A classification request is already in flight")]
    Busy,
}

/// Per-class confidence scores for one classification
#[derive(Debug, Clone, PartialEq)]
pub struct Scores([f32; CLASS_COUNT]);

impl Scores {
    pub fn new(values: [f32; CLASS_COUNT]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f32; CLASS_COUNT] {
        &self.0
    }

    /// Index of the highest score. Ties break to the first-occurring maximum.
    pub fn top_class(&self) -> usize {
        let mut best = 0;
        for (index, &score) in self.0.iter().enumerate() {
            if score > self.0[best] {
                best = index;
            }
        }
        best
    }
}

/// Trait for classification backends
#[allow(async_fn_in_trait)]
pub trait ClassifierBackend {
    /// Classify a digit tensor. Resolves with the per-class scores or the
    /// single failure the request hit; at most one request may be in flight,
    /// a concurrent call returns [`ClassifyError::Busy`].
    async fn classify(&mut self, input: &DigitTensor) -> Result<Scores, ClassifyError>;

    /// Check if a request is currently in flight
    fn is_classifying(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_class_picks_maximum() {
        let mut values = [0.01; CLASS_COUNT];
        values[0] = 0.1;
        values[1] = 0.05;
        values[7] = 0.9;
        let scores = Scores::new(values);
        assert_eq!(scores.top_class(), 7);
    }

    #[test]
    fn test_top_class_tie_breaks_to_first() {
        let mut values = [0.0; CLASS_COUNT];
        values[3] = 0.5;
        values[8] = 0.5;
        let scores = Scores::new(values);
        assert_eq!(scores.top_class(), 3);
    }

    #[test]
    fn test_top_class_uniform_scores() {
        let scores = Scores::new([0.1; CLASS_COUNT]);
        assert_eq!(scores.top_class(), 0);
    }
}
