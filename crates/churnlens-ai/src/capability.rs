use churnlens_core::FeatureVector;

use crate::error::InferenceError;

/// Pre-fit transform applied to a feature vector before classification.
///
/// Implementations hold parameters fixed at load time; `transform` is a pure
/// function of its input.
pub trait Scaler: Send + Sync {
    fn transform(&self, features: &FeatureVector) -> Result<FeatureVector, InferenceError>;
}

/// Binary churn classifier over a scaled feature vector.
pub trait Model: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<ChurnLabel, InferenceError>;
}

/// Raw classifier output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChurnLabel {
    Stay = 0,
    Churn = 1,
}

impl ChurnLabel {
    /// Map a numeric class label, rejecting anything outside {0, 1}.
    pub fn from_code(code: i64) -> Result<Self, InferenceError> {
        match code {
            0 => Ok(Self::Stay),
            1 => Ok(Self::Churn),
            other => Err(InferenceError::InvalidLabel(other)),
        }
    }

    pub fn code(self) -> i64 {
        self as i64
    }
}
