//! Standard-score scaler fitted at training time.

use std::path::Path;

use churnlens_core::{FEATURE_COUNT, FeatureVector};
use serde::Deserialize;

use crate::artifacts::{check_feature_names, feature_array, read_json};
use crate::capability::Scaler;
use crate::error::{ArtifactError, InferenceError};

const ARTIFACT: &str = "scaler";

/// JSON export of a fitted standard scaler. The trailing-underscore aliases
/// match the attribute names of the fitting library.
#[derive(Debug, Deserialize)]
struct ScalerFile {
    #[serde(default, alias = "feature_names_in_")]
    feature_names: Option<Vec<String>>,
    #[serde(alias = "mean_")]
    mean: Vec<f64>,
    #[serde(alias = "scale_")]
    scale: Vec<f64>,
}

/// Per-column `(x - mean) / scale`.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl StandardScaler {
    pub fn new(mean: &[f64], scale: &[f64]) -> Result<Self, ArtifactError> {
        let mean = feature_array(ARTIFACT, mean)?;
        let scale = feature_array(ARTIFACT, scale)?;

        if let Some(index) = scale.iter().position(|&s| s == 0.0) {
            return Err(ArtifactError::InvalidParameter {
                artifact: ARTIFACT,
                index,
                value: 0.0,
                reason: "zero scale",
            });
        }

        Ok(Self { mean, scale })
    }

    /// Load a scaler exported as JSON.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let file: ScalerFile = read_json(ARTIFACT, path)?;
        if let Some(names) = &file.feature_names {
            check_feature_names(ARTIFACT, names)?;
        }
        Self::new(&file.mean, &file.scale)
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64] {
        &self.scale
    }
}

impl Scaler for StandardScaler {
    fn transform(&self, features: &FeatureVector) -> Result<FeatureVector, InferenceError> {
        let mut out = *features.values();
        for ((x, mean), scale) in out.iter_mut().zip(&self.mean).zip(&self.scale) {
            *x = (*x - mean) / scale;
        }
        Ok(FeatureVector::new(out))
    }
}
