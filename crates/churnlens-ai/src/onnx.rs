//! ONNX Runtime classifier for models exported with a `[1, 20]` float input
//! and an int64 label as the first output.

use std::path::Path;
use std::sync::Mutex;

use churnlens_core::{FEATURE_COUNT, FeatureVector};
use ort::session::Session;
use ort::value::Tensor;
use tracing::debug;

use crate::artifacts::ensure_exists;
use crate::capability::{ChurnLabel, Model};
use crate::error::{ArtifactError, InferenceError};

/// Churn classifier backed by an ONNX Runtime session.
///
/// `Session::run` needs exclusive access, so calls are serialized.
pub struct OnnxModel {
    session: Mutex<Session>,
}

impl OnnxModel {
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        ensure_exists(path)?;

        let session = Session::builder()
            .map_err(|e| malformed(path, e))?
            .commit_from_file(path)
            .map_err(|e| malformed(path, e))?;

        if let Some(width) = input_width(session.inputs()[0].dtype())
            && width != FEATURE_COUNT
        {
            return Err(ArtifactError::ShapeMismatch {
                artifact: "model",
                expected: FEATURE_COUNT,
                found: width,
            });
        }

        debug!(model = %path.display(), "onnx session ready");
        Ok(Self {
            session: Mutex::new(session),
        })
    }
}

impl Model for OnnxModel {
    fn predict(&self, features: &FeatureVector) -> Result<ChurnLabel, InferenceError> {
        let shape = [1i64, FEATURE_COUNT as i64];
        let input = Tensor::from_array((shape, features.to_f32_vec().into_boxed_slice()))
            .map_err(runtime)?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| InferenceError::Runtime("onnx session lock poisoned".into()))?;
        let outputs = session.run(ort::inputs![input]).map_err(runtime)?;

        let (_, labels) = outputs[0].try_extract_tensor::<i64>().map_err(runtime)?;
        if labels.len() != 1 {
            return Err(InferenceError::OutputShape {
                found: labels.len(),
            });
        }
        ChurnLabel::from_code(labels[0])
    }
}

fn malformed(path: &Path, e: impl std::fmt::Display) -> ArtifactError {
    ArtifactError::Malformed {
        artifact: "model",
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

fn runtime(e: impl std::fmt::Display) -> InferenceError {
    InferenceError::Runtime(e.to_string())
}

/// Last dimension of the model input, when the graph declares it.
fn input_width(input_type: &ort::value::ValueType) -> Option<usize> {
    match input_type {
        ort::value::ValueType::Tensor { shape, .. } => shape
            .last()
            .and_then(|&d| if d > 0 { Some(d as usize) } else { None }),
        _ => None,
    }
}
