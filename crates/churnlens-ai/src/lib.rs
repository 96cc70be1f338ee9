//! Churn inference: scaler and classifier capabilities, artifact loading, and
//! the adapter that turns an encoded profile into a verdict.

mod artifacts;
mod capability;
mod error;
mod linear;
#[cfg(feature = "onnx")]
mod onnx;
mod predictor;
mod scaler;

pub use artifacts::{ArtifactPaths, Artifacts};
pub use capability::{ChurnLabel, Model, Scaler};
pub use error::{ArtifactError, InferenceError, PredictError};
pub use linear::LinearModel;
#[cfg(feature = "onnx")]
pub use onnx::OnnxModel;
pub use predictor::{ChurnPredictor, Prediction, Severity, Verdict};
pub use scaler::StandardScaler;
