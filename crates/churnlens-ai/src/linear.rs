//! Logistic-regression classifier loaded from exported coefficients.

use std::path::Path;

use churnlens_core::{FEATURE_COUNT, FeatureVector};
use serde::Deserialize;

use crate::artifacts::{check_feature_names, feature_array, read_json};
use crate::capability::{ChurnLabel, Model};
use crate::error::{ArtifactError, InferenceError};

const ARTIFACT: &str = "model";

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Coefficients {
    Flat(Vec<f64>),
    /// `[n_classes - 1, n_features]` as exported for a binary classifier.
    Rows(Vec<Vec<f64>>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Intercept {
    Scalar(f64),
    Vector(Vec<f64>),
}

#[derive(Debug, Deserialize)]
struct LinearFile {
    #[serde(default, alias = "feature_names_in_")]
    feature_names: Option<Vec<String>>,
    #[serde(alias = "coef_")]
    coef: Coefficients,
    #[serde(alias = "intercept_")]
    intercept: Intercept,
    #[serde(default = "default_threshold")]
    threshold: f64,
}

fn default_threshold() -> f64 {
    0.5
}

/// `sigmoid(coef · x + intercept) > threshold` → churn.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    coef: [f64; FEATURE_COUNT],
    intercept: f64,
    threshold: f64,
}

impl LinearModel {
    pub fn new(coef: &[f64], intercept: f64, threshold: f64) -> Result<Self, ArtifactError> {
        let coef = feature_array(ARTIFACT, coef)?;
        if !intercept.is_finite() {
            return Err(ArtifactError::InvalidParameter {
                artifact: ARTIFACT,
                index: FEATURE_COUNT,
                value: intercept,
                reason: "intercept not finite",
            });
        }
        if !(threshold > 0.0 && threshold < 1.0) {
            return Err(ArtifactError::InvalidParameter {
                artifact: ARTIFACT,
                index: FEATURE_COUNT + 1,
                value: threshold,
                reason: "threshold outside (0, 1)",
            });
        }
        Ok(Self {
            coef,
            intercept,
            threshold,
        })
    }

    /// Load coefficients exported as JSON.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let file: LinearFile = read_json(ARTIFACT, path)?;
        if let Some(names) = &file.feature_names {
            check_feature_names(ARTIFACT, names)?;
        }

        let malformed = |reason: &str| ArtifactError::Malformed {
            artifact: ARTIFACT,
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };

        let coef = match file.coef {
            Coefficients::Flat(c) => c,
            Coefficients::Rows(mut rows) if rows.len() == 1 => rows.remove(0),
            Coefficients::Rows(rows) => {
                return Err(malformed(&format!(
                    "expected one row of coefficients, got {}",
                    rows.len()
                )));
            }
        };
        let intercept = match file.intercept {
            Intercept::Scalar(b) => b,
            Intercept::Vector(v) if v.len() == 1 => v[0],
            Intercept::Vector(v) => {
                return Err(malformed(&format!(
                    "expected one intercept, got {}",
                    v.len()
                )));
            }
        };

        Self::new(&coef, intercept, file.threshold)
    }

    /// Churn probability for a scaled vector.
    pub fn probability(&self, features: &FeatureVector) -> f64 {
        let z: f64 = self
            .coef
            .iter()
            .zip(features.as_slice())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;
        1.0 / (1.0 + (-z).exp())
    }
}

impl Model for LinearModel {
    fn predict(&self, features: &FeatureVector) -> Result<ChurnLabel, InferenceError> {
        let p = self.probability(features);
        Ok(if p > self.threshold {
            ChurnLabel::Churn
        } else {
            ChurnLabel::Stay
        })
    }
}
