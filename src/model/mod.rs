pub mod classifier;
pub mod features;

pub use classifier::Classifier;
pub use features::{FEATURE_NAMES, FeatureVector};

use std::path::Path;
use thiserror::Error;

use crate::error::AppError;

#[derive(Error, Debug)]
pub enum ModelLoadError {
    #[error("model file not found: {0}")]
    Missing(String),

    #[error("failed to parse ONNX model: {0}")]
    Parse(tract_onnx::prelude::TractError),

    #[error("failed to prepare ONNX model: {0}")]
    Optimize(tract_onnx::prelude::TractError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictError {
    #[error("inference failed: {0}")]
    Inference(String),

    #[error("model returned no output")]
    EmptyOutput,

    #[error("model output of type {0} is not a label or score tensor")]
    UnsupportedOutput(String),

    #[error("label {0} does not fit the predictions table")]
    LabelOutOfRange(i64),

    #[error("model produced a non-finite score")]
    NonFinite,
}

/// The classifier loaded at startup, or the reason it could not be.
#[derive(Debug)]
pub enum ModelService {
    Ready(Classifier),
    Unavailable { reason: String },
}

impl ModelService {
    /// Loads the model artifact. A failure is logged and kept as the unavailable state.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Classifier::from_path(path) {
            Ok(classifier) => {
                tracing::info!("Model loaded successfully from {}", path.display());
                ModelService::Ready(classifier)
            }
            Err(e) => {
                tracing::error!("Error loading model from {}: {}", path.display(), e);
                ModelService::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ModelService::Ready(_))
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<i32, AppError> {
        match self {
            ModelService::Ready(classifier) => Ok(classifier.predict(features)?),
            ModelService::Unavailable { .. } => Err(AppError::ModelNotLoaded),
        }
    }
}
