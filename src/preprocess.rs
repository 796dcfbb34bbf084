//! Feature preprocessing stage
//!
//! Pluggable transform between request decode and inference. The shipped
//! model takes raw feature vectors, so the default stage is a passthrough;
//! scaling or normalization slots in here without touching route logic.

pub trait Preprocess: Send + Sync {
    fn apply(&self, features: Vec<f32>) -> Vec<f32>;
}

/// Identity passthrough
pub struct Identity;

impl Preprocess for Identity {
    fn apply(&self, features: Vec<f32>) -> Vec<f32> {
        features
    }
}
