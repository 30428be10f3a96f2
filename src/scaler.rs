//! Min-max scaling
//!
//! Applies the scaler fitted at training time to an ordered list of feature
//! columns. Bounds are positional: `data_min[i]` and `data_max[i]` belong to
//! the i-th entry of the scaled-columns list.

use serde::{Deserialize, Serialize};

use crate::error::ComputeError;
use crate::types::{FeatureVector, ScaledFeatureVector};

fn default_feature_range() -> (f64, f64) {
    (0.0, 1.0)
}

/// Fitted min-max scaler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    /// Column names seen at fit time, if recorded
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    /// Per-column minimum observed during training
    pub data_min: Vec<f64>,
    /// Per-column maximum observed during training
    pub data_max: Vec<f64>,
    /// Target range of the transform
    #[serde(default = "default_feature_range")]
    pub feature_range: (f64, f64),
    /// Clip transformed values into `feature_range`
    #[serde(default)]
    pub clip: bool,
}

impl MinMaxScaler {
    /// Create a scaler over the default [0, 1] range
    pub fn new(data_min: Vec<f64>, data_max: Vec<f64>) -> Self {
        Self {
            feature_names: None,
            data_min,
            data_max,
            feature_range: default_feature_range(),
            clip: false,
        }
    }

    /// Number of columns the scaler was fitted on
    pub fn n_features(&self) -> usize {
        self.data_min.len()
    }

    /// Check the fitted bounds against the persisted scaled-columns list
    pub fn check_columns(&self, columns: &[String]) -> Result<(), ComputeError> {
        if self.data_min.len() != self.data_max.len() {
            return Err(ComputeError::InvalidArtifact(format!(
                "scaler has {} minimums but {} maximums",
                self.data_min.len(),
                self.data_max.len()
            )));
        }
        if self.n_features() != columns.len() {
            return Err(ComputeError::ShapeMismatch {
                model: "minmax_scaler".to_string(),
                expected: self.n_features(),
                actual: columns.len(),
            });
        }
        if let Some(names) = &self.feature_names {
            if names.as_slice() != columns {
                return Err(ComputeError::SchemaMismatch(
                    "scaler feature names differ from the scaled-columns list".to_string(),
                ));
            }
        }
        let (lo, hi) = self.feature_range;
        if lo.is_nan() || hi.is_nan() || lo >= hi {
            return Err(ComputeError::InvalidArtifact(format!(
                "scaler feature range ({lo}, {hi}) is empty"
            )));
        }
        if let Some(idx) = self
            .data_min
            .iter()
            .zip(&self.data_max)
            .position(|(min, max)| !min.is_finite() || !max.is_finite() || min > max)
        {
            return Err(ComputeError::InvalidArtifact(format!(
                "scaler bounds for column {} are invalid",
                columns[idx]
            )));
        }
        Ok(())
    }

    /// Scale a single value of column `idx`
    pub fn transform_value(&self, idx: usize, value: f64) -> f64 {
        let (lo, hi) = self.feature_range;
        let min = self.data_min[idx];
        let mut range = self.data_max[idx] - min;
        // Constant columns are shifted, not divided by zero
        if range == 0.0 {
            range = 1.0;
        }
        let scaled = (value - min) / range * (hi - lo) + lo;
        if self.clip {
            scaled.clamp(lo, hi)
        } else {
            scaled
        }
    }

    /// Scale the listed columns of a feature vector, keeping only those columns
    pub fn transform(
        &self,
        features: &FeatureVector,
        columns: &[String],
    ) -> Result<ScaledFeatureVector, ComputeError> {
        if columns.len() != self.n_features() {
            return Err(ComputeError::ShapeMismatch {
                model: "minmax_scaler".to_string(),
                expected: self.n_features(),
                actual: columns.len(),
            });
        }

        let values = columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                features
                    .value(column)
                    .map(|value| self.transform_value(idx, value))
                    .ok_or_else(|| {
                        ComputeError::SchemaMismatch(format!(
                            "scaled column {column} is not a feature"
                        ))
                    })
            })
            .collect::<Result<Vec<f64>, ComputeError>>()?;

        Ok(ScaledFeatureVector {
            columns: columns.to_vec(),
            values,
        })
    }
}
