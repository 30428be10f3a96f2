//! Ordinary least squares regressor

use serde::{Deserialize, Serialize};

use crate::error::ComputeError;
use crate::models::{check_width, Predictor};

/// Fitted linear regression: `y = coef · x + intercept`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    pub coef: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
}

impl LinearRegression {
    pub fn new(coef: Vec<f64>, intercept: f64) -> Self {
        Self {
            coef,
            intercept,
            feature_names: None,
        }
    }
}

impl Predictor for LinearRegression {
    type Output = f64;

    fn kind(&self) -> &'static str {
        "linear_regression"
    }

    fn n_features(&self) -> usize {
        self.coef.len()
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn validate(&self) -> Result<(), ComputeError> {
        if self.coef.is_empty() {
            return Err(ComputeError::InvalidArtifact(
                "linear regression has no coefficients".to_string(),
            ));
        }
        if !self.intercept.is_finite() || self.coef.iter().any(|c| !c.is_finite()) {
            return Err(ComputeError::InvalidArtifact(
                "linear regression has non-finite parameters".to_string(),
            ));
        }
        Ok(())
    }

    fn predict(&self, x: &[f64]) -> Result<f64, ComputeError> {
        check_width(self, x)?;
        Ok(dot(&self.coef, x) + self.intercept)
    }
}

pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(a, b)| a * b).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict() {
        let model = LinearRegression::new(vec![0.2, -0.1, 0.05], 0.3);
        let y = model.predict(&[1.0, 2.0, 4.0]).unwrap();
        // 0.2 - 0.2 + 0.2 + 0.3
        assert!((y - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_validate() {
        assert!(LinearRegression::new(vec![1.0], 0.0).validate().is_ok());
        assert!(LinearRegression::new(vec![], 0.0).validate().is_err());
        assert!(LinearRegression::new(vec![f64::NAN], 0.0).validate().is_err());
    }
}
