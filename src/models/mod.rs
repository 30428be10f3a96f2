//! Pre-trained model artifacts
//!
//! Every model consumes the same projected feature vector. Artifacts are plain
//! JSON tagged by `kind`, so a slot in the ensemble can hold any supported
//! model of the right family.

pub mod forest;
pub mod label;
pub mod linear;
pub mod logistic;

use serde::{Deserialize, Serialize};

use crate::error::ComputeError;

pub use forest::{DecisionTree, RandomForestClassifier};
pub use label::LabelEncoder;
pub use linear::LinearRegression;
pub use logistic::LogisticRegression;

/// Common interface of every model in the ensemble
pub trait Predictor {
    type Output;

    /// Artifact kind, used in error messages
    fn kind(&self) -> &'static str;

    /// Width of the input vector the model was fitted on
    fn n_features(&self) -> usize;

    /// Column names recorded at fit time, if any
    fn feature_names(&self) -> Option<&[String]>;

    /// Check internal consistency of the artifact
    fn validate(&self) -> Result<(), ComputeError>;

    fn predict(&self, x: &[f64]) -> Result<Self::Output, ComputeError>;
}

/// Fail unless `x` has the width the model expects
pub(crate) fn check_width<P: Predictor + ?Sized>(model: &P, x: &[f64]) -> Result<(), ComputeError> {
    if x.len() != model.n_features() {
        return Err(ComputeError::ShapeMismatch {
            model: model.kind().to_string(),
            expected: model.n_features(),
            actual: x.len(),
        });
    }
    Ok(())
}

/// Model producing a continuous score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Regressor {
    LinearRegression(LinearRegression),
}

impl Predictor for Regressor {
    type Output = f64;

    fn kind(&self) -> &'static str {
        match self {
            Regressor::LinearRegression(m) => m.kind(),
        }
    }

    fn n_features(&self) -> usize {
        match self {
            Regressor::LinearRegression(m) => m.n_features(),
        }
    }

    fn feature_names(&self) -> Option<&[String]> {
        match self {
            Regressor::LinearRegression(m) => m.feature_names(),
        }
    }

    fn validate(&self) -> Result<(), ComputeError> {
        match self {
            Regressor::LinearRegression(m) => m.validate(),
        }
    }

    fn predict(&self, x: &[f64]) -> Result<f64, ComputeError> {
        match self {
            Regressor::LinearRegression(m) => m.predict(x),
        }
    }
}

/// Model producing a class value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classifier {
    RandomForestClassifier(RandomForestClassifier),
    LogisticRegression(LogisticRegression),
}

impl Classifier {
    /// Class values the classifier can emit
    pub fn classes(&self) -> &[i64] {
        match self {
            Classifier::RandomForestClassifier(m) => &m.classes,
            Classifier::LogisticRegression(m) => &m.classes,
        }
    }
}

impl Predictor for Classifier {
    type Output = i64;

    fn kind(&self) -> &'static str {
        match self {
            Classifier::RandomForestClassifier(m) => m.kind(),
            Classifier::LogisticRegression(m) => m.kind(),
        }
    }

    fn n_features(&self) -> usize {
        match self {
            Classifier::RandomForestClassifier(m) => m.n_features(),
            Classifier::LogisticRegression(m) => m.n_features(),
        }
    }

    fn feature_names(&self) -> Option<&[String]> {
        match self {
            Classifier::RandomForestClassifier(m) => m.feature_names(),
            Classifier::LogisticRegression(m) => m.feature_names(),
        }
    }

    fn validate(&self) -> Result<(), ComputeError> {
        match self {
            Classifier::RandomForestClassifier(m) => m.validate(),
            Classifier::LogisticRegression(m) => m.validate(),
        }
    }

    fn predict(&self, x: &[f64]) -> Result<i64, ComputeError> {
        match self {
            Classifier::RandomForestClassifier(m) => m.predict(x),
            Classifier::LogisticRegression(m) => m.predict(x),
        }
    }
}

/// Index of the largest value, preferring the lowest index on ties
pub(crate) fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, &value) in values.iter().enumerate() {
        match best {
            Some((_, current)) if value <= current => {}
            _ => best = Some((idx, value)),
        }
    }
    best.map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax_prefers_first_on_ties() {
        assert_eq!(argmax(&[0.2, 0.5, 0.5]), Some(1));
        assert_eq!(argmax(&[1.0]), Some(0));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn test_deserialize_tagged_regressor() {
        let json = r#"{ "kind": "linear_regression", "coef": [0.5, -0.25], "intercept": 0.1 }"#;
        let model: Regressor = serde_json::from_str(json).unwrap();

        assert_eq!(model.kind(), "linear_regression");
        assert_eq!(model.n_features(), 2);
        let y = model.predict(&[1.0, 2.0]).unwrap();
        assert!((y - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_deserialize_tagged_classifier() {
        let json = r#"{
            "kind": "logistic_regression",
            "coef": [[1.0, -1.0]],
            "intercept": [0.0],
            "classes": [0, 1]
        }"#;
        let model: Classifier = serde_json::from_str(json).unwrap();

        assert_eq!(model.kind(), "logistic_regression");
        assert_eq!(model.classes(), &[0, 1]);
        assert_eq!(model.predict(&[2.0, 1.0]).unwrap(), 1);
        assert_eq!(model.predict(&[1.0, 2.0]).unwrap(), 0);
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let json = r#"{ "kind": "gradient_boosting", "coef": [1.0], "intercept": 0.0 }"#;
        assert!(serde_json::from_str::<Regressor>(json).is_err());
    }

    #[test]
    fn test_width_mismatch() {
        let model = Regressor::LinearRegression(LinearRegression::new(vec![1.0, 2.0], 0.0));
        let err = model.predict(&[1.0]).unwrap_err();

        assert!(matches!(
            err,
            ComputeError::ShapeMismatch { expected: 2, actual: 1, .. }
        ));
    }
}
