//! Load-once scaler and model artifacts.
//!
//! Both artifacts are read at process start and never reloaded. A missing or
//! malformed artifact is fatal: nothing can be predicted without the pair.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use churnlens_core::{FEATURE_COUNT, FEATURE_NAMES};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::capability::{Model, Scaler};
use crate::error::ArtifactError;
use crate::linear::LinearModel;
use crate::scaler::StandardScaler;

/// Where to find the serialized scaler and model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub scaler: PathBuf,
    pub model: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            scaler: PathBuf::from("scaler.json"),
            model: PathBuf::from("model.json"),
        }
    }
}

/// The loaded scaler/model pair. Immutable after load; clones share the
/// same underlying artifacts.
#[derive(Clone)]
pub struct Artifacts {
    scaler: Arc<dyn Scaler>,
    model: Arc<dyn Model>,
}

impl Artifacts {
    /// Load both artifacts, failing on the first one that is unusable.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        let scaler = StandardScaler::load(&paths.scaler)?;
        info!(path = %paths.scaler.display(), "loaded scaler");

        let model = load_model(&paths.model)?;
        info!(path = %paths.model.display(), "loaded model");

        Ok(Self {
            scaler: Arc::new(scaler),
            model,
        })
    }

    /// Wrap artifacts constructed elsewhere.
    pub fn new(scaler: Arc<dyn Scaler>, model: Arc<dyn Model>) -> Self {
        Self { scaler, model }
    }

    pub fn scaler(&self) -> Arc<dyn Scaler> {
        Arc::clone(&self.scaler)
    }

    pub fn model(&self) -> Arc<dyn Model> {
        Arc::clone(&self.model)
    }
}

/// Pick the model implementation from the file extension.
fn load_model(path: &Path) -> Result<Arc<dyn Model>, ArtifactError> {
    ensure_exists(path)?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(Arc::new(LinearModel::load(path)?)),
        #[cfg(feature = "onnx")]
        Some("onnx") => Ok(Arc::new(crate::onnx::OnnxModel::load(path)?)),
        #[cfg(not(feature = "onnx"))]
        Some("onnx") => Err(ArtifactError::Unsupported(format!(
            "{} (built without the `onnx` feature)",
            path.display()
        ))),
        _ => Err(ArtifactError::Unsupported(path.display().to_string())),
    }
}

// ── Shared artifact helpers ──

pub(crate) fn ensure_exists(path: &Path) -> Result<(), ArtifactError> {
    if path.exists() {
        Ok(())
    } else {
        Err(ArtifactError::Missing(path.to_path_buf()))
    }
}

/// Read and deserialize a JSON artifact.
pub(crate) fn read_json<T: DeserializeOwned>(
    artifact: &'static str,
    path: &Path,
) -> Result<T, ArtifactError> {
    ensure_exists(path)?;
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| ArtifactError::Malformed {
        artifact,
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Check a per-feature parameter list against the encoder layout.
pub(crate) fn feature_array(
    artifact: &'static str,
    values: &[f64],
) -> Result<[f64; FEATURE_COUNT], ArtifactError> {
    let array: [f64; FEATURE_COUNT] = values.try_into().map_err(|_| ArtifactError::ShapeMismatch {
        artifact,
        expected: FEATURE_COUNT,
        found: values.len(),
    })?;

    if let Some((index, &value)) = array.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(ArtifactError::InvalidParameter {
            artifact,
            index,
            value,
            reason: "not finite",
        });
    }
    Ok(array)
}

/// Column names recorded at fit time must match the encoder's order exactly.
pub(crate) fn check_feature_names(
    artifact: &'static str,
    names: &[String],
) -> Result<(), ArtifactError> {
    if names.len() != FEATURE_COUNT {
        return Err(ArtifactError::ShapeMismatch {
            artifact,
            expected: FEATURE_COUNT,
            found: names.len(),
        });
    }
    for (index, (found, expected)) in names.iter().zip(FEATURE_NAMES).enumerate() {
        if found != expected {
            return Err(ArtifactError::FeatureOrder {
                artifact,
                index,
                expected,
                found: found.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::predictor::{ChurnPredictor, Verdict};
    use churnlens_core::RawProfile;
    use std::io::Write;

    pub(crate) fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    pub(crate) fn names_json() -> String {
        serde_json::to_string(&FEATURE_NAMES).unwrap()
    }

    /// Identity scaler and a model that churns on month-to-month contracts.
    fn fixture(dir: &Path) -> ArtifactPaths {
        let scaler = format!(
            r#"{{"feature_names": {}, "mean": {:?}, "scale": {:?}}}"#,
            names_json(),
            vec![0.0; FEATURE_COUNT],
            vec![1.0; FEATURE_COUNT]
        );
        let mut coef = vec![0.0; FEATURE_COUNT];
        coef[13] = -4.0; // Contract
        let model = format!(r#"{{"coef": {coef:?}, "intercept": 2.0}}"#);

        ArtifactPaths {
            scaler: write_file(dir, "scaler.json", &scaler),
            model: write_file(dir, "model.json", &model),
        }
    }

    fn profile(contract: &str) -> RawProfile {
        RawProfile::new()
            .with("gender", "Female")
            .with("SeniorCitizen", 0.0)
            .with("Partner", "Yes")
            .with("Dependents", "Yes")
            .with("tenure", 24.0)
            .with("MultipleLines", "Yes")
            .with("InternetService", "Fiber optic")
            .with("OnlineSecurity", "No")
            .with("OnlineBackup", "No")
            .with("DeviceProtection", "Yes")
            .with("TechSupport", "No")
            .with("StreamingTV", "Yes")
            .with("StreamingMovies", "Yes")
            .with("Contract", contract)
            .with("PaperlessBilling", "Yes")
            .with("PaymentMethod", "Bank transfer (automatic)")
            .with("MonthlyCharges", 99.9)
            .with("TotalCharges", 2397.6)
    }

    #[test]
    fn load_and_predict_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let artifacts = Artifacts::load(&fixture(dir.path())).unwrap();
        let predictor = ChurnPredictor::from_artifacts(&artifacts);

        let monthly = predictor.predict_profile(&profile("Month-to-month")).unwrap();
        assert_eq!(monthly.verdict, Verdict::LikelyToChurn);

        let two_year = predictor.predict_profile(&profile("Two year")).unwrap();
        assert_eq!(two_year.verdict, Verdict::LikelyToStay);
    }

    #[test]
    fn missing_scaler_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = fixture(dir.path());
        paths.scaler = dir.path().join("nope.json");
        assert!(matches!(
            Artifacts::load(&paths),
            Err(ArtifactError::Missing(p)) if p.ends_with("nope.json")
        ));
    }

    #[test]
    fn missing_model_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = fixture(dir.path());
        paths.model = dir.path().join("model.onnx");
        assert!(matches!(
            Artifacts::load(&paths),
            Err(ArtifactError::Missing(_))
        ));
    }

    #[test]
    fn malformed_json_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = fixture(dir.path());
        paths.model = write_file(dir.path(), "broken.json", "{ not json");
        assert!(matches!(
            Artifacts::load(&paths),
            Err(ArtifactError::Malformed { artifact: "model", .. })
        ));
    }

    #[test]
    fn unknown_model_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = fixture(dir.path());
        paths.model = write_file(dir.path(), "model.pkl", "");
        assert!(matches!(
            Artifacts::load(&paths),
            Err(ArtifactError::Unsupported(_))
        ));
    }

    #[cfg(not(feature = "onnx"))]
    #[test]
    fn onnx_model_requires_feature() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = fixture(dir.path());
        paths.model = write_file(dir.path(), "model.onnx", "");
        let err = Artifacts::load(&paths).err().unwrap();
        assert!(err.to_string().contains("onnx"), "{err}");
    }

    #[test]
    fn feature_array_rejects_wrong_length_and_non_finite() {
        assert!(matches!(
            feature_array("scaler", &[1.0; 18]),
            Err(ArtifactError::ShapeMismatch { expected: 20, found: 18, .. })
        ));

        let mut values = vec![1.0; FEATURE_COUNT];
        values[7] = f64::INFINITY;
        assert!(matches!(
            feature_array("scaler", &values),
            Err(ArtifactError::InvalidParameter { index: 7, .. })
        ));
    }

    #[test]
    fn feature_names_must_match_order() {
        let mut names: Vec<String> = FEATURE_NAMES.iter().map(|s| s.to_string()).collect();
        assert!(check_feature_names("scaler", &names).is_ok());

        names.swap(18, 19);
        match check_feature_names("scaler", &names) {
            Err(ArtifactError::FeatureOrder {
                index, expected, ..
            }) => {
                assert_eq!(index, 18);
                assert_eq!(expected, "NoInternetService");
            }
            other => panic!("expected FeatureOrder, got {other:?}"),
        }

        names.pop();
        assert!(matches!(
            check_feature_names("scaler", &names),
            Err(ArtifactError::ShapeMismatch { found: 19, .. })
        ));
    }

    #[test]
    fn default_paths() {
        let paths = ArtifactPaths::default();
        assert_eq!(paths.scaler, PathBuf::from("scaler.json"));
        assert_eq!(paths.model, PathBuf::from("model.json"));
    }
}
