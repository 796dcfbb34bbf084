//! Inference Engine - ONNX Runtime Integration
//!
//! Loads the serialized classifier once and runs single-sample inference.
//! Kept behind the `Classifier` trait so the HTTP layer never touches ort.

use std::path::Path;

use ndarray::Array2;
use parking_lot::Mutex;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;

use super::prediction::ClassProbs;

/// Inference failure, carrying the underlying runtime message
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct InferenceError(pub String);

/// A binary attack/benign classifier.
///
/// Takes one feature vector and returns the two-class probability
/// distribution. Implementations must be shareable across requests.
pub trait Classifier: Send + Sync {
    fn class_probs(&self, features: &[f32]) -> Result<ClassProbs, InferenceError>;
}

/// ONNX-backed classifier
///
/// The session needs `&mut` to run, so it sits behind a mutex; the model
/// itself is read-only for the process lifetime.
pub struct OnnxClassifier {
    session: Mutex<Session>,
}

impl OnnxClassifier {
    /// Load the model from file. Called once at startup; a failure here
    /// is fatal to the process.
    pub fn load(model_path: &Path) -> Result<Self, InferenceError> {
        tracing::info!("Loading ONNX model from: {}", model_path.display());

        if !model_path.exists() {
            return Err(InferenceError(format!(
                "Model not found: {}",
                model_path.display()
            )));
        }

        let session = Session::builder()
            .map_err(|e| InferenceError(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| InferenceError(format!("Failed to load model: {}", e)))?;

        tracing::info!("ONNX model loaded successfully");

        Ok(Self {
            session: Mutex::new(session),
        })
    }
}

impl Classifier for OnnxClassifier {
    fn class_probs(&self, features: &[f32]) -> Result<ClassProbs, InferenceError> {
        if features.is_empty() {
            return Err(InferenceError("Empty feature vector".to_string()));
        }

        let mut session = self.session.lock();

        let output_name = session
            .outputs()
            .first()
            .map(|o| o.name().to_string())
            .ok_or_else(|| InferenceError("No output defined".to_string()))?;

        // Shape [1, n]: one sample per call
        let input_array = Array2::<f32>::from_shape_vec((1, features.len()), features.to_vec())
            .map_err(|e| InferenceError(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| InferenceError(format!("Tensor error: {}", e)))?;

        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError(format!("Inference failed: {}", e)))?;

        let output = outputs
            .get(&output_name)
            .ok_or_else(|| InferenceError("No output".to_string()))?;

        let output_tensor = output
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError(format!("Extract error: {}", e)))?;

        let data = output_tensor.1;

        if data.len() < 2 {
            return Err(InferenceError(format!(
                "Expected two class probabilities, model returned {}",
                data.len()
            )));
        }

        Ok(ClassProbs {
            benign: data[0],
            attack: data[1],
        })
    }
}
