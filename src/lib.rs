//! Mindflux - Wellness signal scoring with pre-trained models
//!
//! Mindflux turns a self-reported wellness form submission into anxiety,
//! depression and stress indicators through a deterministic pipeline:
//! validation → sentiment scoring → feature engineering → min-max scaling
//! → model-feature projection → model ensemble → label decoding.
//!
//! ## Modules
//!
//! - **Input**: `schema` defines the raw submission and its ranges
//! - **Features**: `sentiment` and `features` build the model feature vector
//! - **Models**: `scaler`, `projection`, `models` and `artifacts` hold the
//!   pre-trained state, loaded once and validated up front
//! - **Output**: `pipeline` runs submissions, `encoder` produces payloads

pub mod artifacts;
pub mod encoder;
pub mod error;
pub mod features;
pub mod models;
pub mod pipeline;
pub mod projection;
pub mod scaler;
pub mod schema;
pub mod sentiment;
pub mod types;

pub use artifacts::{ArtifactManifest, ModelArtifacts};
pub use error::ComputeError;
pub use pipeline::{assess_json, InsightEngine};

// Schema exports
pub use schema::{RawInput, ValidationError, SCHEMA_VERSION};

// Sentiment exports
pub use sentiment::{LexiconSentiment, SentimentScorer, VaderSentiment};

/// Mindflux version embedded in all insight payloads
pub const MINDFLUX_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for insight payloads
pub const PRODUCER_NAME: &str = "mindflux";
