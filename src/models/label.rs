//! Label encoder

use serde::{Deserialize, Serialize};

use crate::error::ComputeError;

/// Bidirectional mapping between class index and human-readable label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    /// Label for a class index
    pub fn decode(&self, value: i64) -> Option<&str> {
        usize::try_from(value)
            .ok()
            .and_then(|idx| self.classes.get(idx))
            .map(String::as_str)
    }

    /// Class index for a label
    pub fn encode(&self, label: &str) -> Option<i64> {
        self.classes
            .iter()
            .position(|c| c == label)
            .map(|idx| idx as i64)
    }

    pub fn validate(&self) -> Result<(), ComputeError> {
        if self.classes.is_empty() {
            return Err(ComputeError::InvalidArtifact(
                "label encoder has no classes".to_string(),
            ));
        }
        for (idx, class) in self.classes.iter().enumerate() {
            if self.classes[..idx].contains(class) {
                return Err(ComputeError::InvalidArtifact(format!(
                    "label encoder lists {class} more than once"
                )));
            }
        }
        Ok(())
    }
}
