//! Logistic regression classifier

use serde::{Deserialize, Serialize};

use crate::error::ComputeError;
use crate::models::linear::dot;
use crate::models::{argmax, check_width, Predictor};

/// Fitted logistic regression.
///
/// Binary models carry a single coefficient row and predict `classes[1]` when
/// the decision value is positive. Multi-class models carry one row per class
/// and predict the class with the largest decision value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
    pub classes: Vec<i64>,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
}

impl LogisticRegression {
    /// Binary model over classes `[0, 1]`
    pub fn binary(coef: Vec<f64>, intercept: f64) -> Self {
        Self {
            coef: vec![coef],
            intercept: vec![intercept],
            classes: vec![0, 1],
            feature_names: None,
        }
    }

    pub fn is_binary(&self) -> bool {
        self.classes.len() == 2
    }

    /// Decision values, one per coefficient row
    pub fn decision_function(&self, x: &[f64]) -> Result<Vec<f64>, ComputeError> {
        check_width(self, x)?;
        Ok(self
            .coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| dot(row, x) + b)
            .collect())
    }

    /// Class probabilities in `classes` order
    pub fn predict_proba(&self, x: &[f64]) -> Result<Vec<f64>, ComputeError> {
        let decision = self.decision_function(x)?;

        if self.is_binary() {
            let p = sigmoid(first_decision(&decision)?);
            return Ok(vec![1.0 - p, p]);
        }

        // Softmax, shifted by the max for stability
        let max = decision.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = decision.iter().map(|d| (d - max).exp()).collect();
        let total: f64 = exps.iter().sum();
        Ok(exps.into_iter().map(|e| e / total).collect())
    }
}

/// Binary models decide on their single coefficient row
fn first_decision(decision: &[f64]) -> Result<f64, ComputeError> {
    decision.first().copied().ok_or_else(|| {
        ComputeError::InvalidArtifact("logistic regression has no coefficient rows".to_string())
    })
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl Predictor for LogisticRegression {
    type Output = i64;

    fn kind(&self) -> &'static str {
        "logistic_regression"
    }

    fn n_features(&self) -> usize {
        self.coef.first().map(Vec::len).unwrap_or(0)
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn validate(&self) -> Result<(), ComputeError> {
        if self.classes.len() < 2 {
            return Err(ComputeError::InvalidArtifact(
                "logistic regression needs at least two classes".to_string(),
            ));
        }
        let expected_rows = if self.is_binary() { 1 } else { self.classes.len() };
        if self.coef.len() != expected_rows || self.intercept.len() != expected_rows {
            return Err(ComputeError::InvalidArtifact(format!(
                "logistic regression over {} classes needs {} coefficient rows and intercepts, got {} and {}",
                self.classes.len(),
                expected_rows,
                self.coef.len(),
                self.intercept.len()
            )));
        }
        let width = self.n_features();
        if width == 0 || self.coef.iter().any(|row| row.len() != width) {
            return Err(ComputeError::InvalidArtifact(
                "logistic regression coefficient rows have inconsistent widths".to_string(),
            ));
        }
        Ok(())
    }

    fn predict(&self, x: &[f64]) -> Result<i64, ComputeError> {
        let decision = self.decision_function(x)?;

        let idx = if self.is_binary() {
            usize::from(first_decision(&decision)? > 0.0)
        } else {
            argmax(&decision).ok_or_else(|| {
                ComputeError::InvalidArtifact("logistic regression has no classes".to_string())
            })?
        };

        self.classes.get(idx).copied().ok_or_else(|| {
            ComputeError::InvalidArtifact(format!("logistic regression has no class {idx}"))
        })
    }
}
