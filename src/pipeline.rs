//! Pipeline orchestration
//!
//! This module provides the public API for Mindflux.
//! It runs one submission through the full pipeline, from raw input to
//! decoded predictions.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::artifacts::ModelArtifacts;
use crate::encoder::InsightEncoder;
use crate::error::ComputeError;
use crate::features::FeatureBuilder;
use crate::models::{Classifier, LabelEncoder, Predictor, Regressor};
use crate::projection::FeatureProjector;
use crate::schema::RawInput;
use crate::sentiment::{score_triple, SentimentScorer, VaderSentiment};
use crate::types::{
    Assessment, FeatureVector, Metric, MetricFailure, ModelInput, PartialAssessment,
    PartialPredictions, Predictions, SentimentTriple,
};

/// Assess one raw JSON submission and return the insight payload as JSON.
///
/// # Arguments
/// * `raw_json` - A `RawInput` JSON object (missing fields take form defaults)
/// * `artifacts_dir` - Directory holding the model artifacts
///
/// # Example
/// ```ignore
/// let payload = assess_json(
///     r#"{ "heart_rate": 88, "stress": 8 }"#.to_string(),
///     Path::new("demos/artifacts"),
/// )?;
/// ```
pub fn assess_json(raw_json: String, artifacts_dir: &Path) -> Result<String, ComputeError> {
    let input: RawInput = serde_json::from_str(&raw_json)?;
    let engine = InsightEngine::from_dir(artifacts_dir)?;
    let assessment = engine.assess(&input)?;
    InsightEncoder::new().encode_to_json(&assessment.into())
}

/// Scores submissions against a loaded artifact set.
///
/// Pipeline stages:
/// 1. RawInput::validate - Range-check the submission
/// 2. SentimentScorer - Score the three free-text fields
/// 3. FeatureBuilder - Engineer the feature vector
/// 4. MinMaxScaler - Scale the persisted column list
/// 5. FeatureProjector - Select the model feature columns
/// 6. Ensemble - Two regressors, three classifiers, label decoding
///
/// Cloning is cheap; artifacts and scorer are shared read-only.
#[derive(Clone)]
pub struct InsightEngine {
    artifacts: Arc<ModelArtifacts>,
    scorer: Arc<dyn SentimentScorer + Send + Sync>,
}

impl InsightEngine {
    /// Create an engine with the VADER scorer
    pub fn new(artifacts: ModelArtifacts) -> Self {
        Self::with_scorer(artifacts, VaderSentiment::new())
    }

    /// Create an engine with a custom sentiment scorer
    pub fn with_scorer<S>(artifacts: ModelArtifacts, scorer: S) -> Self
    where
        S: SentimentScorer + Send + Sync + 'static,
    {
        Self {
            artifacts: Arc::new(artifacts),
            scorer: Arc::new(scorer),
        }
    }

    /// Load artifacts from a directory and create an engine
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, ComputeError> {
        Ok(Self::new(ModelArtifacts::load_dir(dir)?))
    }

    pub fn artifacts(&self) -> &ModelArtifacts {
        &self.artifacts
    }

    /// Score the free-text fields of a submission
    pub fn sentiment(&self, input: &RawInput) -> SentimentTriple {
        score_triple(
            self.scorer.as_ref(),
            &input.posts,
            &input.comments,
            &input.status,
        )
    }

    /// Validate a submission and build its feature vector, without scoring it
    pub fn features(
        &self,
        input: &RawInput,
    ) -> Result<(SentimentTriple, FeatureVector), ComputeError> {
        input.validate()?;
        let sentiment = self.sentiment(input);
        let features = FeatureBuilder::build(input, sentiment);
        debug!(
            average_sentiment = features.average_sentiment,
            physical_risk_score = features.physical_risk_score,
            "Built feature vector"
        );
        Ok((sentiment, features))
    }

    /// Scale and project a feature vector into the shared model input
    pub fn model_input(&self, features: &FeatureVector) -> Result<ModelInput, ComputeError> {
        let scaled = self
            .artifacts
            .scaler()
            .transform(features, self.artifacts.scaled_columns())?;
        let projected =
            FeatureProjector::project(&scaled, self.artifacts.model_feature_columns())?;
        debug!(
            scaled = scaled.len(),
            projected = projected.len(),
            "Prepared model input"
        );
        Ok(projected)
    }

    /// Run the full pipeline; any failure aborts the assessment
    pub fn assess(&self, input: &RawInput) -> Result<Assessment, ComputeError> {
        let (sentiment, features) = self.features(input)?;
        let model_input = self.model_input(&features)?;
        let x = model_input.as_slice();

        let predictions = Predictions {
            anxiety_score: self.score(self.artifacts.anxiety_regressor(), x)?,
            depression_score: self.score(self.artifacts.depression_regressor(), x)?,
            anxiety_level: self.level(
                self.artifacts.anxiety_classifier(),
                self.artifacts.anxiety_encoder(),
                "anxiety_level",
                x,
            )?,
            depression_level: self.level(
                self.artifacts.depression_classifier(),
                self.artifacts.depression_encoder(),
                "depression_level",
                x,
            )?,
            high_stress: self.high_stress(x)?,
        };
        debug!(?predictions, "Assessment complete");

        Ok(Assessment {
            sentiment,
            features,
            model_input,
            predictions,
        })
    }

    /// Run the full pipeline, recording individual model failures instead of
    /// aborting. Input, feature and scaling failures still abort.
    pub fn assess_partial(&self, input: &RawInput) -> Result<PartialAssessment, ComputeError> {
        let (sentiment, features) = self.features(input)?;
        let model_input = self.model_input(&features)?;
        let x = model_input.as_slice();

        let mut failures = Vec::new();
        let predictions = PartialPredictions {
            anxiety_score: record(
                Metric::AnxietyScore,
                self.score(self.artifacts.anxiety_regressor(), x),
                &mut failures,
            ),
            depression_score: record(
                Metric::DepressionScore,
                self.score(self.artifacts.depression_regressor(), x),
                &mut failures,
            ),
            anxiety_level: record(
                Metric::AnxietyLevel,
                self.level(
                    self.artifacts.anxiety_classifier(),
                    self.artifacts.anxiety_encoder(),
                    "anxiety_level",
                    x,
                ),
                &mut failures,
            ),
            depression_level: record(
                Metric::DepressionLevel,
                self.level(
                    self.artifacts.depression_classifier(),
                    self.artifacts.depression_encoder(),
                    "depression_level",
                    x,
                ),
                &mut failures,
            ),
            high_stress: record(Metric::HighStress, self.high_stress(x), &mut failures),
        };

        Ok(PartialAssessment {
            sentiment,
            features,
            model_input,
            predictions,
            failures,
        })
    }

    fn score(&self, model: &Regressor, x: &[f64]) -> Result<f64, ComputeError> {
        model.predict(x)
    }

    fn level(
        &self,
        model: &Classifier,
        encoder: &LabelEncoder,
        encoder_name: &str,
        x: &[f64],
    ) -> Result<String, ComputeError> {
        let value = model.predict(x)?;
        encoder
            .decode(value)
            .map(str::to_string)
            .ok_or_else(|| ComputeError::UnknownLabel {
                encoder: encoder_name.to_string(),
                value,
            })
    }

    fn high_stress(&self, x: &[f64]) -> Result<bool, ComputeError> {
        Ok(self.artifacts.stress_classifier().predict(x)? == 1)
    }
}

fn record<T>(
    metric: Metric,
    result: Result<T, ComputeError>,
    failures: &mut Vec<MetricFailure>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(metric = metric.as_str(), error = %e, "Metric unavailable");
            failures.push(MetricFailure {
                metric,
                message: e.to_string(),
            });
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::fixtures;
    use crate::models::LinearRegression;
    use crate::schema::ValidationError;
    use crate::types::FEATURE_COLUMNS;
    use pretty_assertions::assert_eq;

    fn engine() -> InsightEngine {
        InsightEngine::new(fixtures::artifacts())
    }

    fn stressed_input() -> RawInput {
        RawInput {
            stress: 9,
            mood: 2,
            sleep_hours: 4.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_form_end_to_end() {
        let assessment = engine().assess(&RawInput::default()).unwrap();

        assert_eq!(assessment.sentiment, SentimentTriple::default());
        assert_eq!(assessment.features.average_sentiment, 0.0);
        assert_eq!(assessment.features.sentiment_variance, 0.0);
        assert_eq!(assessment.features.physical_risk_score, 1);
        assert_eq!(
            assessment.model_input.columns,
            fixtures::model_feature_columns()
        );

        // Scaled StressLevel 4/9 falls left in both stumps
        assert_eq!(assessment.predictions.anxiety_level, "Low");
        assert_eq!(assessment.predictions.depression_level, "Low");
        assert!(!assessment.predictions.high_stress);

        // 0.4*4/9 - 0.2*5/9 - 0.1*7/12 - 0.1*0.5 + 0.3
        let expected = 0.4 * 4.0 / 9.0 - 0.2 * 5.0 / 9.0 - 0.1 * 7.0 / 12.0 - 0.05 + 0.3;
        assert!((assessment.predictions.anxiety_score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_stressed_input() {
        let assessment = engine().assess(&stressed_input()).unwrap();

        assert_eq!(assessment.predictions.anxiety_level, "High");
        assert_eq!(assessment.predictions.depression_level, "High");
        assert!(assessment.predictions.high_stress);
        assert!((assessment.predictions.anxiety_score - 0.55).abs() < 1e-9);
    }

    #[test]
    fn test_projection_values_come_from_scaler() {
        let assessment = engine().assess(&RawInput::default()).unwrap();
        let values = &assessment.model_input.values;

        assert!((values[0] - 4.0 / 9.0).abs() < 1e-12);
        assert!((values[1] - 5.0 / 9.0).abs() < 1e-12);
        assert!((values[2] - 7.0 / 12.0).abs() < 1e-12);
        assert_eq!(values[3], 0.5);
    }

    #[test]
    fn test_assess_is_idempotent() {
        let engine = engine();
        let input = RawInput {
            posts: "Had a wonderful walk with friends".to_string(),
            comments: "so tired of everything".to_string(),
            ..stressed_input()
        };

        let first = engine.assess(&input).unwrap();
        let second = engine.assess(&input).unwrap();
        assert_eq!(first, second);

        let first_bits: Vec<u64> = first.model_input.values.iter().map(|v| v.to_bits()).collect();
        let second_bits: Vec<u64> = second.model_input.values.iter().map(|v| v.to_bits()).collect();
        assert_eq!(first_bits, second_bits);
    }

    #[test]
    fn test_text_fields_drive_sentiment_features() {
        let input = RawInput {
            posts: "I love this, feeling great".to_string(),
            comments: String::new(),
            status: "   ".to_string(),
            ..Default::default()
        };
        let (sentiment, features) = engine().features(&input).unwrap();

        assert!(sentiment.post > 0.0);
        assert_eq!(sentiment.comment, 0.0);
        assert_eq!(sentiment.status, 0.0);
        assert!((features.average_sentiment - sentiment.post / 3.0).abs() < 1e-12);
        assert_eq!(features.to_columns().len(), FEATURE_COLUMNS.len());
    }

    #[test]
    fn test_out_of_range_input_is_rejected() {
        let input = RawInput {
            heart_rate: 20,
            ..Default::default()
        };

        match engine().assess(&input) {
            Err(ComputeError::InvalidInput(ValidationError::OutOfRange { field, .. })) => {
                assert_eq!(field, "heart_rate");
            }
            other => panic!("expected invalid input, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_scorer() {
        struct Gloomy;
        impl SentimentScorer for Gloomy {
            fn polarity(&self, _text: &str) -> f64 {
                -1.0
            }
        }

        let engine = InsightEngine::with_scorer(fixtures::artifacts(), Gloomy);
        let input = RawInput {
            posts: "anything".to_string(),
            comments: "anything".to_string(),
            status: "anything".to_string(),
            ..Default::default()
        };
        let assessment = engine.assess(&input).unwrap();

        assert_eq!(assessment.features.average_sentiment, -1.0);
        assert_eq!(assessment.model_input.values[3], 0.0);
    }

    #[test]
    fn test_partial_matches_strict_when_models_agree() {
        let engine = engine();
        let strict = engine.assess(&stressed_input()).unwrap();
        let partial = engine.assess_partial(&stressed_input()).unwrap();

        assert!(partial.is_complete());
        assert_eq!(partial, PartialAssessment::from(strict));
    }

    #[test]
    fn test_partial_reports_failed_metric() {
        // Bypass load-time validation to simulate a model that breaks at inference
        let mut parts = fixtures::parts();
        parts.depression_regressor =
            Regressor::LinearRegression(LinearRegression::new(vec![0.1, 0.2], 0.0));
        let engine = InsightEngine::new(ModelArtifacts::unchecked(parts));

        assert!(matches!(
            engine.assess(&RawInput::default()),
            Err(ComputeError::ShapeMismatch { .. })
        ));

        let partial = engine.assess_partial(&RawInput::default()).unwrap();
        assert!(!partial.is_complete());
        assert_eq!(partial.failures.len(), 1);
        assert_eq!(partial.failures[0].metric, Metric::DepressionScore);
        assert!(partial.predictions.depression_score.is_none());
        assert!(partial.predictions.anxiety_score.is_some());
        assert_eq!(partial.predictions.anxiety_level.as_deref(), Some("Low"));
        assert_eq!(partial.predictions.high_stress, Some(false));
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        let engine = engine();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = engine.clone();
                std::thread::spawn(move || engine.assess(&RawInput::default()).unwrap())
            })
            .collect();

        let results: Vec<Assessment> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_assess_json_with_demo_artifacts() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/artifacts");
        let payload = assess_json(r#"{ "stress": 9, "mood": 2 }"#.to_string(), &dir).unwrap();

        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["producer"]["name"], "mindflux");
        assert!(value["insights"]["anxiety_level"].is_string());
        assert!(value["insights"]["anxiety_score_display"]
            .as_str()
            .unwrap()
            .ends_with(" / 100"));
        assert!(value["failures"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_assess_json_invalid_json() {
        let result = assess_json("not json".to_string(), Path::new("demos/artifacts"));
        assert!(matches!(result, Err(ComputeError::JsonError(_))));
    }
}
