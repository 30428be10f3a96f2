//! Error types for Mindflux

use std::path::PathBuf;

use thiserror::Error;

use crate::schema::ValidationError;

/// Errors that can occur while loading artifacts or computing insights
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("Failed to read artifact {path}: {source}")]
    ArtifactLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse artifact {path}: {source}")]
    ArtifactParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid artifact: {0}")]
    InvalidArtifact(String),

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Shape mismatch for {model}: expected {expected} features, got {actual}")]
    ShapeMismatch {
        model: String,
        expected: usize,
        actual: usize,
    },

    #[error("Label encoder {encoder} has no class for value {value}")]
    UnknownLabel { encoder: String, value: i64 },

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}
