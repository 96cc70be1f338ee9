use std::path::PathBuf;

use churnlens_core::{EncodeError, ShapeError};
use thiserror::Error;

/// Failure to load the scaler or model at startup.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact not found: {0}")]
    Missing(PathBuf),

    #[error("malformed {artifact} at {path}: {reason}")]
    Malformed {
        artifact: &'static str,
        path: PathBuf,
        reason: String,
    },

    #[error("{artifact} expects {found} features, encoder produces {expected}")]
    ShapeMismatch {
        artifact: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{artifact} column {index} is {found:?}, encoder produces {expected:?}")]
    FeatureOrder {
        artifact: &'static str,
        index: usize,
        expected: &'static str,
        found: String,
    },

    #[error("{artifact} parameter {index} is {value}: {reason}")]
    InvalidParameter {
        artifact: &'static str,
        index: usize,
        value: f64,
        reason: &'static str,
    },

    #[error("unsupported model format: {0}")]
    Unsupported(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure while scaling or classifying a vector.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("shape mismatch: {0}")]
    ShapeMismatch(#[from] ShapeError),

    #[error("model returned {found} outputs, expected exactly one label")]
    OutputShape { found: usize },

    #[error("model returned label {0}, expected 0 or 1")]
    InvalidLabel(i64),

    #[error("model runtime error: {0}")]
    Runtime(String),
}

/// Any failure along the profile → verdict path.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}
