//! Model Module - ONNX classifier and prediction shaping
//!
//! The classifier is loaded once at startup and injected into handlers
//! behind the `Classifier` trait so tests can swap in mock models.

pub mod inference;
pub mod prediction;

pub use inference::{Classifier, InferenceError, OnnxClassifier};
pub use prediction::{ClassProbs, Label, Prediction};
