//! Artifact loading
//!
//! All pre-trained artifacts are read once from a directory and checked for
//! mutual consistency before any input is scored. A `ModelArtifacts` value can
//! only be obtained through that check, and is never mutated afterwards.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ComputeError;
use crate::models::{Classifier, LabelEncoder, Predictor, Regressor};
use crate::projection::{ensure_subset, ensure_unique};
use crate::scaler::MinMaxScaler;
use crate::types::FEATURE_COLUMNS;

/// Optional file in the artifact directory overriding artifact file names
pub const MANIFEST_FILE: &str = "manifest.json";

/// File names of every artifact, relative to the artifact directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactManifest {
    pub anxiety_classifier: PathBuf,
    pub depression_classifier: PathBuf,
    pub anxiety_regressor: PathBuf,
    pub depression_regressor: PathBuf,
    pub stress_classifier: PathBuf,
    pub anxiety_encoder: PathBuf,
    pub depression_encoder: PathBuf,
    pub scaler: PathBuf,
    pub scaled_columns: PathBuf,
    pub model_feature_columns: PathBuf,
}

impl Default for ArtifactManifest {
    fn default() -> Self {
        Self {
            anxiety_classifier: "random_forest_anxiety_level.json".into(),
            depression_classifier: "random_forest_depression_level.json".into(),
            anxiety_regressor: "linear_regression_anxiety_score.json".into(),
            depression_regressor: "linear_regression_depression_score.json".into(),
            stress_classifier: "logistic_regression_high_stress.json".into(),
            anxiety_encoder: "encoder_anxiety_level.json".into(),
            depression_encoder: "encoder_depression_level.json".into(),
            scaler: "minmax_scaler.json".into(),
            scaled_columns: "scaled_columns.json".into(),
            model_feature_columns: "model_feature_columns.json".into(),
        }
    }
}

impl ArtifactManifest {
    /// Read `manifest.json` from `dir`, falling back to default names
    pub fn for_dir(dir: &Path) -> Result<Self, ComputeError> {
        let path = dir.join(MANIFEST_FILE);
        if path.is_file() {
            debug!(path = %path.display(), "Using artifact manifest");
            read_json(&path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Unchecked artifacts, as deserialized
#[derive(Debug, Clone)]
pub struct ArtifactParts {
    pub anxiety_regressor: Regressor,
    pub depression_regressor: Regressor,
    pub anxiety_classifier: Classifier,
    pub depression_classifier: Classifier,
    pub stress_classifier: Classifier,
    pub anxiety_encoder: LabelEncoder,
    pub depression_encoder: LabelEncoder,
    pub scaler: MinMaxScaler,
    pub scaled_columns: Vec<String>,
    pub model_feature_columns: Vec<String>,
}

impl ArtifactParts {
    /// Deserialize every artifact named by `manifest` under `dir`
    pub fn read(dir: &Path, manifest: &ArtifactManifest) -> Result<Self, ComputeError> {
        Ok(Self {
            anxiety_regressor: read_json(&dir.join(&manifest.anxiety_regressor))?,
            depression_regressor: read_json(&dir.join(&manifest.depression_regressor))?,
            anxiety_classifier: read_json(&dir.join(&manifest.anxiety_classifier))?,
            depression_classifier: read_json(&dir.join(&manifest.depression_classifier))?,
            stress_classifier: read_json(&dir.join(&manifest.stress_classifier))?,
            anxiety_encoder: read_json(&dir.join(&manifest.anxiety_encoder))?,
            depression_encoder: read_json(&dir.join(&manifest.depression_encoder))?,
            scaler: read_json(&dir.join(&manifest.scaler))?,
            scaled_columns: read_json(&dir.join(&manifest.scaled_columns))?,
            model_feature_columns: read_json(&dir.join(&manifest.model_feature_columns))?,
        })
    }
}

/// Validated, immutable artifact set shared by every computation
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    parts: ArtifactParts,
}

impl ModelArtifacts {
    /// Load and validate all artifacts from `dir`
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self, ComputeError> {
        let dir = dir.as_ref();
        info!(dir = %dir.display(), "Loading model artifacts");

        let manifest = ArtifactManifest::for_dir(dir)?;
        let artifacts = Self::from_parts(ArtifactParts::read(dir, &manifest)?)?;

        info!(
            scaled_columns = artifacts.scaled_columns().len(),
            model_features = artifacts.model_feature_columns().len(),
            "Model artifacts loaded"
        );
        Ok(artifacts)
    }

    /// Validate already-deserialized artifacts
    pub fn from_parts(parts: ArtifactParts) -> Result<Self, ComputeError> {
        validate_parts(&parts)?;
        Ok(Self { parts })
    }

    /// Skip validation so tests can exercise inference-time failures
    #[cfg(test)]
    pub(crate) fn unchecked(parts: ArtifactParts) -> Self {
        Self { parts }
    }

    pub fn anxiety_regressor(&self) -> &Regressor {
        &self.parts.anxiety_regressor
    }

    pub fn depression_regressor(&self) -> &Regressor {
        &self.parts.depression_regressor
    }

    pub fn anxiety_classifier(&self) -> &Classifier {
        &self.parts.anxiety_classifier
    }

    pub fn depression_classifier(&self) -> &Classifier {
        &self.parts.depression_classifier
    }

    pub fn stress_classifier(&self) -> &Classifier {
        &self.parts.stress_classifier
    }

    pub fn anxiety_encoder(&self) -> &LabelEncoder {
        &self.parts.anxiety_encoder
    }

    pub fn depression_encoder(&self) -> &LabelEncoder {
        &self.parts.depression_encoder
    }

    pub fn scaler(&self) -> &MinMaxScaler {
        &self.parts.scaler
    }

    pub fn scaled_columns(&self) -> &[String] {
        &self.parts.scaled_columns
    }

    pub fn model_feature_columns(&self) -> &[String] {
        &self.parts.model_feature_columns
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ComputeError> {
    let content = fs::read_to_string(path).map_err(|source| ComputeError::ArtifactLoad {
        path: path.to_path_buf(),
        source,
    })?;
    let value = serde_json::from_str(&content).map_err(|source| ComputeError::ArtifactParse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "Read artifact");
    Ok(value)
}

/// Attribute a model error to the slot it occurred in
fn in_slot(slot: &str, error: ComputeError) -> ComputeError {
    match error {
        ComputeError::InvalidArtifact(msg) => ComputeError::InvalidArtifact(format!("{slot}: {msg}")),
        ComputeError::ShapeMismatch {
            expected, actual, ..
        } => ComputeError::ShapeMismatch {
            model: slot.to_string(),
            expected,
            actual,
        },
        other => other,
    }
}

fn check_model<P: Predictor + ?Sized>(
    slot: &str,
    model: &P,
    model_columns: &[String],
) -> Result<(), ComputeError> {
    model.validate().map_err(|e| in_slot(slot, e))?;

    if model.n_features() != model_columns.len() {
        return Err(ComputeError::ShapeMismatch {
            model: slot.to_string(),
            expected: model.n_features(),
            actual: model_columns.len(),
        });
    }
    if let Some(names) = model.feature_names() {
        if names != model_columns {
            return Err(ComputeError::SchemaMismatch(format!(
                "{slot} was fitted on different feature columns"
            )));
        }
    }
    Ok(())
}

fn check_decodable(
    slot: &str,
    classifier: &Classifier,
    encoder_name: &str,
    encoder: &LabelEncoder,
) -> Result<(), ComputeError> {
    encoder.validate().map_err(|e| in_slot(encoder_name, e))?;

    match classifier
        .classes()
        .iter()
        .find(|&&value| encoder.decode(value).is_none())
    {
        Some(&value) => {
            debug!(slot, encoder = encoder_name, value, "Class has no label");
            Err(ComputeError::UnknownLabel {
                encoder: encoder_name.to_string(),
                value,
            })
        }
        None => Ok(()),
    }
}

fn validate_parts(parts: &ArtifactParts) -> Result<(), ComputeError> {
    let scaled = &parts.scaled_columns;
    let model_columns = &parts.model_feature_columns;

    if scaled.is_empty() || model_columns.is_empty() {
        return Err(ComputeError::SchemaMismatch(
            "column lists must not be empty".to_string(),
        ));
    }
    ensure_unique(scaled, "scaled columns")?;
    ensure_subset(scaled, &FEATURE_COLUMNS, "scaled columns", "the feature schema")?;
    parts.scaler.check_columns(scaled)?;

    ensure_unique(model_columns, "model feature columns")?;
    ensure_subset(model_columns, scaled, "model feature", "scaled columns")?;

    check_model("anxiety_regressor", &parts.anxiety_regressor, model_columns)?;
    check_model("depression_regressor", &parts.depression_regressor, model_columns)?;
    check_model("anxiety_classifier", &parts.anxiety_classifier, model_columns)?;
    check_model("depression_classifier", &parts.depression_classifier, model_columns)?;
    check_model("stress_classifier", &parts.stress_classifier, model_columns)?;

    check_decodable(
        "anxiety_classifier",
        &parts.anxiety_classifier,
        "anxiety_level",
        &parts.anxiety_encoder,
    )?;
    check_decodable(
        "depression_classifier",
        &parts.depression_classifier,
        "depression_level",
        &parts.depression_encoder,
    )?;

    let mut stress_classes = parts.stress_classifier.classes().to_vec();
    stress_classes.sort_unstable();
    if stress_classes != [0, 1] {
        return Err(ComputeError::InvalidArtifact(format!(
            "stress_classifier must be binary over classes [0, 1], got {:?}",
            parts.stress_classifier.classes()
        )));
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::fixtures::{parts, strings};
    use super::*;
    use crate::models::LinearRegression;

    #[test]
    fn test_fixture_parts_are_valid() {
        let artifacts = ModelArtifacts::from_parts(parts()).unwrap();
        assert_eq!(artifacts.model_feature_columns().len(), 4);
        assert_eq!(artifacts.scaled_columns().len(), 8);
    }

    #[test]
    fn test_unknown_scaled_column_fails_fast() {
        let mut p = parts();
        p.scaled_columns[0] = "HeartRateVariability".to_string();

        let err = ModelArtifacts::from_parts(p).unwrap_err();
        assert!(matches!(err, ComputeError::SchemaMismatch(_)));
        assert!(err.to_string().contains("HeartRateVariability"));
    }

    #[test]
    fn test_duplicate_scaled_column_fails() {
        let mut p = parts();
        p.scaled_columns[1] = "HeartRate".to_string();
        assert!(matches!(
            ModelArtifacts::from_parts(p),
            Err(ComputeError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn test_model_columns_must_be_scaled() {
        let mut p = parts();
        p.model_feature_columns[3] = "EngagementScore".to_string();
        assert!(matches!(
            ModelArtifacts::from_parts(p),
            Err(ComputeError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn test_scaler_width_must_match_columns() {
        let mut p = parts();
        p.scaled_columns.pop();
        assert!(matches!(
            ModelArtifacts::from_parts(p),
            Err(ComputeError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_model_width_mismatch_names_slot() {
        let mut p = parts();
        p.depression_regressor =
            Regressor::LinearRegression(LinearRegression::new(vec![0.1, 0.2, 0.3], 0.0));

        match ModelArtifacts::from_parts(p) {
            Err(ComputeError::ShapeMismatch {
                model,
                expected,
                actual,
            }) => {
                assert_eq!(model, "depression_regressor");
                assert_eq!(expected, 3);
                assert_eq!(actual, 4);
            }
            other => panic!("expected shape mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_model_feature_names_must_match() {
        let mut p = parts();
        let mut model = LinearRegression::new(vec![0.1, 0.2, 0.3, 0.4], 0.0);
        model.feature_names = Some(strings(&["Mood", "StressLevel", "SleepHours", "AverageSentiment"]));
        p.anxiety_regressor = Regressor::LinearRegression(model);

        assert!(matches!(
            ModelArtifacts::from_parts(p),
            Err(ComputeError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn test_classifier_classes_must_decode() {
        let mut p = parts();
        p.anxiety_encoder = LabelEncoder::new(strings(&["Low", "High"]));

        assert!(matches!(
            ModelArtifacts::from_parts(p),
            Err(ComputeError::UnknownLabel { value: 2, .. })
        ));
    }

    #[test]
    fn test_stress_classifier_must_be_binary() {
        let mut p = parts();
        p.stress_classifier = p.anxiety_classifier.clone();
        assert!(matches!(
            ModelArtifacts::from_parts(p),
            Err(ComputeError::InvalidArtifact(_))
        ));
    }

    #[test]
    fn test_missing_directory_is_load_error() {
        let err = ModelArtifacts::load_dir("/nonexistent/mindflux/artifacts").unwrap_err();
        assert!(matches!(err, ComputeError::ArtifactLoad { .. }));
    }

    #[test]
    fn test_manifest_defaults_when_absent() {
        let manifest = ArtifactManifest::for_dir(Path::new("/nonexistent")).unwrap();
        assert_eq!(manifest, ArtifactManifest::default());
    }

    #[test]
    fn test_manifest_partial_override() {
        let json = r#"{ "scaler": "scaler_v2.json" }"#;
        let manifest: ArtifactManifest = serde_json::from_str(json).unwrap();

        assert_eq!(manifest.scaler, PathBuf::from("scaler_v2.json"));
        assert_eq!(
            manifest.scaled_columns,
            PathBuf::from("scaled_columns.json")
        );
    }

    fn demo_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/artifacts")
    }

    /// Copy the demo artifacts into a fresh directory under the system temp dir
    fn scratch_demo_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("mindflux-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        for entry in fs::read_dir(demo_dir()).unwrap() {
            let path = entry.unwrap().path();
            fs::copy(&path, dir.join(path.file_name().unwrap())).unwrap();
        }
        dir
    }

    #[test]
    fn test_load_demo_artifacts() {
        let artifacts = ModelArtifacts::load_dir(demo_dir()).unwrap();

        assert_eq!(artifacts.scaled_columns().len(), FEATURE_COLUMNS.len());
        assert_eq!(artifacts.model_feature_columns().len(), 8);
        assert_eq!(artifacts.anxiety_classifier().kind(), "random_forest_classifier");
        assert_eq!(artifacts.depression_classifier().classes(), &[0, 1, 2]);
        assert_eq!(
            artifacts.anxiety_encoder().classes,
            strings(&["High", "Low", "Moderate"])
        );
    }

    #[test]
    fn test_manifest_renames_artifact() {
        let dir = scratch_demo_dir();
        fs::rename(dir.join("minmax_scaler.json"), dir.join("scaler_v2.json")).unwrap();

        // Default names no longer resolve
        assert!(matches!(
            ModelArtifacts::load_dir(&dir),
            Err(ComputeError::ArtifactLoad { .. })
        ));

        fs::write(dir.join(MANIFEST_FILE), r#"{ "scaler": "scaler_v2.json" }"#).unwrap();
        let manifest = ArtifactManifest::for_dir(&dir).unwrap();
        assert_eq!(manifest.scaler, PathBuf::from("scaler_v2.json"));

        let artifacts = ModelArtifacts::load_dir(&dir).unwrap();
        assert_eq!(artifacts.scaler().n_features(), FEATURE_COLUMNS.len());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_malformed_manifest_is_parse_error() {
        let dir = scratch_demo_dir();
        fs::write(dir.join(MANIFEST_FILE), "{ \"scaler\": ").unwrap();

        match ModelArtifacts::load_dir(&dir) {
            Err(ComputeError::ArtifactParse { path, .. }) => {
                assert_eq!(path, dir.join(MANIFEST_FILE));
            }
            other => panic!("expected manifest parse error, got {other:?}"),
        }

        fs::remove_dir_all(&dir).unwrap();
    }
}
