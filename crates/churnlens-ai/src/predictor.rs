//! Inference adapter: encoded profile → scaled vector → label → verdict.

use std::fmt;
use std::sync::Arc;

use churnlens_core::{CustomerProfile, FeatureVector, RawProfile, encode, encode_raw};
use tracing::debug;

use crate::artifacts::Artifacts;
use crate::capability::{ChurnLabel, Model, Scaler};
use crate::error::{InferenceError, PredictError};

/// User-facing outcome of a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    LikelyToChurn,
    LikelyToStay,
}

/// How the presentation layer should style a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Error,
}

impl Verdict {
    pub fn message(&self) -> &'static str {
        match self {
            Self::LikelyToChurn => "Customer is likely to churn",
            Self::LikelyToStay => "Customer is likely to stay",
        }
    }

    /// Churn is the adverse outcome.
    pub fn severity(&self) -> Severity {
        match self {
            Self::LikelyToChurn => Severity::Error,
            Self::LikelyToStay => Severity::Success,
        }
    }
}

impl From<ChurnLabel> for Verdict {
    fn from(label: ChurnLabel) -> Self {
        match label {
            ChurnLabel::Churn => Self::LikelyToChurn,
            ChurnLabel::Stay => Self::LikelyToStay,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prediction {
    pub label: ChurnLabel,
    pub verdict: Verdict,
}

impl From<ChurnLabel> for Prediction {
    fn from(label: ChurnLabel) -> Self {
        Self {
            label,
            verdict: Verdict::from(label),
        }
    }
}

/// Runs the scaler and model over encoded profiles.
///
/// Holds shared, read-only handles; clone freely across threads.
#[derive(Clone)]
pub struct ChurnPredictor {
    scaler: Arc<dyn Scaler>,
    model: Arc<dyn Model>,
}

impl ChurnPredictor {
    pub fn new(scaler: Arc<dyn Scaler>, model: Arc<dyn Model>) -> Self {
        Self { scaler, model }
    }

    pub fn from_artifacts(artifacts: &Artifacts) -> Self {
        Self::new(artifacts.scaler(), artifacts.model())
    }

    pub fn scale(&self, features: &FeatureVector) -> Result<FeatureVector, InferenceError> {
        self.scaler.transform(features)
    }

    pub fn predict_label(&self, scaled: &FeatureVector) -> Result<ChurnLabel, InferenceError> {
        self.model.predict(scaled)
    }

    /// Scale then classify an unscaled feature vector.
    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction, InferenceError> {
        let scaled = self.scale(features)?;
        let label = self.predict_label(&scaled)?;
        debug!(label = label.code(), "model prediction");
        Ok(Prediction::from(label))
    }

    /// Encode and classify a profile whose categories are already resolved.
    pub fn predict_customer(
        &self,
        profile: &CustomerProfile,
    ) -> Result<Prediction, InferenceError> {
        self.predict(&encode(profile))
    }

    /// Encode, scale and classify a raw profile.
    pub fn predict_profile(&self, raw: &RawProfile) -> Result<Prediction, PredictError> {
        let features = encode_raw(raw)?;
        Ok(self.predict(&features)?)
    }

    /// Predict each profile independently; one failure does not affect the rest.
    pub fn predict_batch(&self, raws: &[RawProfile]) -> Vec<Result<Prediction, PredictError>> {
        raws.iter().map(|raw| self.predict_profile(raw)).collect()
    }
}
