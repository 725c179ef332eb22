//! Local digit model - candle forward pass over bundled safetensors weights

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use candle_core::{D, DType, Device, Tensor};
use candle_nn::{Linear, Module, VarBuilder, linear};
use tracing::{debug, info};

use crate::preprocess::{DigitTensor, IMAGE_PIXELS, IMAGE_SIDE};
use crate::{CLASS_COUNT, ClassifierBackend, ClassifyError, Scores};

/// Hidden layer width of the bundled model
const HIDDEN_DIM: usize = 128;

/// The pre-trained digit model: flatten -> dense -> relu -> dense -> softmax.
///
/// Declared input shape (1, 28, 28, 1), output shape (1, 10).
#[derive(Debug)]
pub struct DigitModel {
    fc1: Linear,
    fc2: Linear,
    device: Device,
}

impl DigitModel {
    /// Build the model graph from a variable store
    pub fn new(vb: VarBuilder, device: Device) -> Result<Self, ClassifyError> {
        let fc1 = linear(IMAGE_PIXELS, HIDDEN_DIM, vb.pp("fc1"))
            .map_err(|e| ClassifyError::ModelLoad(e.to_string()))?;
        let fc2 = linear(HIDDEN_DIM, CLASS_COUNT, vb.pp("fc2"))
            .map_err(|e| ClassifyError::ModelLoad(e.to_string()))?;
        Ok(Self { fc1, fc2, device })
    }

    /// Load the model from a safetensors asset file
    pub fn load(path: &Path) -> Result<Self, ClassifyError> {
        let device = Device::Cpu;
        let tensors = candle_core::safetensors::load(path, &device)
            .map_err(|e| ClassifyError::ModelLoad(e.to_string()))?;
        let vb = VarBuilder::from_tensors(tensors, DType::F32, &device);
        info!("Loaded digit model from {}", path.display());
        Self::new(vb, device)
    }

    /// Run the forward pass synchronously
    pub fn forward(&self, input: &DigitTensor) -> Result<Scores, ClassifyError> {
        let infer = |e: candle_core::Error| ClassifyError::Inference(e.to_string());

        let xs = Tensor::from_slice(
            input.values(),
            (1, IMAGE_SIDE, IMAGE_SIDE, 1),
            &self.device,
        )
        .map_err(infer)?;

        let xs = xs.reshape((1, IMAGE_PIXELS)).map_err(infer)?;
        let xs = self.fc1.forward(&xs).map_err(infer)?;
        let xs = xs.relu().map_err(infer)?;
        let xs = self.fc2.forward(&xs).map_err(infer)?;
        let probabilities = candle_nn::ops::softmax(&xs, D::Minus1).map_err(infer)?;

        let rows = probabilities.to_vec2::<f32>().map_err(infer)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| ClassifyError::Inference("empty model output".to_string()))?;
        if row.len() != CLASS_COUNT {
            return Err(ClassifyError::Inference(format!(
                "expected {CLASS_COUNT} class scores, got {}",
                row.len()
            )));
        }

        let mut values = [0.0f32; CLASS_COUNT];
        for (slot, score) in values.iter_mut().zip(row) {
            *slot = score;
        }
        Ok(Scores::new(values))
    }
}

/// Local classifier that runs the model on a blocking worker.
///
/// One request at a time: a classify call while another is in flight fails
/// fast with [`ClassifyError::Busy`] instead of queueing.
#[derive(Debug)]
pub struct LocalClassifier {
    model: Arc<DigitModel>,
    classifying: Arc<AtomicBool>,
}

impl LocalClassifier {
    /// Load the classifier from a safetensors asset file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClassifyError> {
        Ok(Self::from_model(DigitModel::load(path.as_ref())?))
    }

    /// Wrap an already-built model
    pub fn from_model(model: DigitModel) -> Self {
        Self {
            model: Arc::new(model),
            classifying: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl ClassifierBackend for LocalClassifier {
    async fn classify(&mut self, input: &DigitTensor) -> Result<Scores, ClassifyError> {
        if self.classifying.swap(true, Ordering::SeqCst) {
            return Err(ClassifyError::Busy);
        }

        debug!("LocalClassifier::classify: dispatching inference");
        let model = Arc::clone(&self.model);
        let input = input.clone();
        let result = tokio::task::spawn_blocking(move || model.forward(&input))
            .await
            .map_err(|e| ClassifyError::Inference(e.to_string()))
            .and_then(|inner| inner);

        self.classifying.store(false, Ordering::SeqCst);
        result
    }

    fn is_classifying(&self) -> bool {
        self.classifying.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_model() -> DigitModel {
        let device = Device::Cpu;
        let vb = VarBuilder::zeros(DType::F32, &device);
        DigitModel::new(vb, device).unwrap()
    }

    fn blank_tensor() -> DigitTensor {
        DigitTensor::from_values(vec![0.0; IMAGE_PIXELS]).unwrap()
    }

    #[test]
    fn test_zero_weights_give_uniform_scores() {
        let model = zero_model();
        let scores = model.forward(&blank_tensor()).unwrap();

        // All logits are zero, so softmax is uniform and argmax falls on 0
        for &score in scores.values() {
            assert!((score - 0.1).abs() < 1e-6);
        }
        assert_eq!(scores.top_class(), 0);
    }

    #[test]
    fn test_forward_is_deterministic() {
        let model = zero_model();
        let first = model.forward(&blank_tensor()).unwrap();
        let second = model.forward(&blank_tensor()).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_local_classifier_classify() {
        let mut classifier = LocalClassifier::from_model(zero_model());
        assert!(!classifier.is_classifying());

        let scores = classifier.classify(&blank_tensor()).await.unwrap();
        assert_eq!(scores.top_class(), 0);

        // The in-flight flag is released once the request resolves
        assert!(!classifier.is_classifying());
    }

    #[tokio::test]
    async fn test_sequential_requests_are_accepted() {
        let mut classifier = LocalClassifier::from_model(zero_model());
        assert!(classifier.classify(&blank_tensor()).await.is_ok());
        assert!(classifier.classify(&blank_tensor()).await.is_ok());
    }

    #[test]
    fn test_missing_model_file_fails_to_load() {
        let err = LocalClassifier::load("does/not/exist.safetensors").unwrap_err();
        assert!(matches!(err, ClassifyError::ModelLoad(_)));
    }
}
