//! Model-feature projection
//!
//! Selects and reorders scaled columns into the single vector every model
//! consumes. Values are never transformed here.

use std::collections::HashSet;

use crate::error::ComputeError;
use crate::types::{ModelInput, ScaledFeatureVector};

/// Column selector for model inputs
pub struct FeatureProjector;

impl FeatureProjector {
    /// Project the scaled vector onto `columns`, in that order
    pub fn project(
        scaled: &ScaledFeatureVector,
        columns: &[String],
    ) -> Result<ModelInput, ComputeError> {
        let values = columns
            .iter()
            .map(|column| {
                scaled.get(column).ok_or_else(|| {
                    ComputeError::SchemaMismatch(format!(
                        "model feature column {column} is not a scaled column"
                    ))
                })
            })
            .collect::<Result<Vec<f64>, ComputeError>>()?;

        Ok(ModelInput {
            columns: columns.to_vec(),
            values,
        })
    }
}

/// Fail if `columns` repeats a name
pub fn ensure_unique(columns: &[String], list_name: &str) -> Result<(), ComputeError> {
    let mut seen = HashSet::new();
    for column in columns {
        if !seen.insert(column.as_str()) {
            return Err(ComputeError::SchemaMismatch(format!(
                "{list_name} lists column {column} more than once"
            )));
        }
    }
    Ok(())
}

/// Fail unless every entry of `subset` appears in `superset`
pub fn ensure_subset<S: AsRef<str>>(
    subset: &[String],
    superset: &[S],
    subset_name: &str,
    superset_name: &str,
) -> Result<(), ComputeError> {
    let known: HashSet<&str> = superset.iter().map(|s| s.as_ref()).collect();
    match subset.iter().find(|column| !known.contains(column.as_str())) {
        Some(column) => Err(ComputeError::SchemaMismatch(format!(
            "{subset_name} column {column} is not in {superset_name}"
        ))),
        None => Ok(()),
    }
}
