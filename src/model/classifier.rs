use std::fmt;
use std::path::Path;
use tract_onnx::prelude::*;

use super::{FEATURE_NAMES, FeatureVector};
use super::{ModelLoadError, PredictError};

/// An ONNX classifier optimized for a single row of the seven features.
///
/// Expects the layout skl2onnx produces with `zipmap` disabled: one float
/// input of shape `[N, 7]` in form field order, and a first output that is
/// either the int64 label or the per-class float scores.
pub struct Classifier {
    plan: SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>,
}

impl fmt::Debug for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Classifier").finish_non_exhaustive()
    }
}

impl Classifier {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModelLoadError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ModelLoadError::Missing(path.display().to_string()));
        }

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .map_err(ModelLoadError::Parse)?
            .with_input_fact(0, f32::fact([1, FEATURE_NAMES.len()]).into())
            .map_err(ModelLoadError::Optimize)?
            .into_optimized()
            .map_err(ModelLoadError::Optimize)?
            .into_runnable()
            .map_err(ModelLoadError::Optimize)?;

        Ok(Self { plan })
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<i32, PredictError> {
        let row: Vec<f32> = features.values().iter().map(|v| *v as f32).collect();
        let input: Tensor = tract_ndarray::Array2::from_shape_vec((1, FEATURE_NAMES.len()), row)
            .map_err(|e| PredictError::Inference(e.to_string()))?
            .into();

        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| PredictError::Inference(e.to_string()))?;
        let output = outputs.first().ok_or(PredictError::EmptyOutput)?;

        match output.datum_type() {
            DatumType::I64 => {
                let labels = output
                    .to_array_view::<i64>()
                    .map_err(|e| PredictError::Inference(e.to_string()))?;
                let label = *labels.iter().next().ok_or(PredictError::EmptyOutput)?;
                i32::try_from(label).map_err(|_| PredictError::LabelOutOfRange(label))
            }
            DatumType::F32 => {
                let scores = output
                    .to_array_view::<f32>()
                    .map_err(|e| PredictError::Inference(e.to_string()))?;
                let scores: Vec<f32> = scores.iter().copied().collect();
                let best = argmax(&scores)?;
                i32::try_from(best).map_err(|_| PredictError::LabelOutOfRange(best as i64))
            }
            other => Err(PredictError::UnsupportedOutput(format!("{:?}", other))),
        }
    }
}

/// Index of the largest score; the first one wins ties.
fn argmax(scores: &[f32]) -> Result<usize, PredictError> {
    if scores.is_empty() {
        return Err(PredictError::EmptyOutput);
    }
    if scores.iter().any(|s| !s.is_finite()) {
        return Err(PredictError::NonFinite);
    }
    let mut best = 0;
    for (i, s) in scores.iter().enumerate().skip(1) {
        if *s > scores[best] {
            best = i;
        }
    }
    Ok(best)
}
