//! Core types for the Mindflux pipeline
//!
//! This module defines the data structures that flow through each stage of the
//! pipeline: sentiment scores, the engineered feature vector, the scaled and
//! projected model inputs, predictions, and the encoded insight payload.

use serde::{Deserialize, Serialize};

/// Column names of the engineered feature vector, in training-table order.
///
/// Persisted column lists (scaled columns, model feature columns) refer to
/// features by these names.
pub const FEATURE_COLUMNS: [&str; 32] = [
    "HeartRate",
    "SleepHours",
    "ActivityLevel",
    "BodyTemperature",
    "SocialPosts",
    "InteractionFrequency",
    "ScreenTime",
    "LocationChanges",
    "CalendarEvents",
    "Mood",
    "StressLevel",
    "DailyReflections",
    "PostSentiment",
    "CommentSentiment",
    "StatusSentiment",
    "AverageSentiment",
    "SentimentVariance",
    "MoodStressRatio",
    "InteractionPostRatio",
    "ActiveHours",
    "ScreenTimePercentage",
    "HighStress",
    "ExcessiveScreenTime",
    "MobileUser",
    "SleepDeprivation",
    "MoodStressDifference",
    "EngagementScore",
    "MoodSentimentInteraction",
    "PhysicalRiskScore",
    "RoutineDisruptionScore",
    "AnxietyScore",
    "DepressionScore",
];

/// Compound sentiment scores for the three free-text fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentTriple {
    /// Posts sentiment (-1 to 1)
    pub post: f64,
    /// Comments sentiment (-1 to 1)
    pub comment: f64,
    /// Status updates sentiment (-1 to 1)
    pub status: f64,
}

impl SentimentTriple {
    pub fn as_array(&self) -> [f64; 3] {
        [self.post, self.comment, self.status]
    }
}

/// Engineered feature vector matching the schema the models were trained on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    // Pass-through inputs
    pub heart_rate: u32,
    pub sleep_hours: f64,
    pub activity_level: u32,
    pub body_temperature: f64,
    pub social_posts: u32,
    pub interaction_frequency: u32,
    pub screen_time: f64,
    pub location_changes: u32,
    pub calendar_events: u32,
    pub mood: u32,
    pub stress_level: u32,
    pub daily_reflections: u32,
    pub post_sentiment: f64,
    pub comment_sentiment: f64,
    pub status_sentiment: f64,

    // Derived features
    pub average_sentiment: f64,
    pub sentiment_variance: f64,
    pub mood_stress_ratio: f64,
    pub interaction_post_ratio: f64,
    pub active_hours: f64,
    pub screen_time_percentage: f64,
    pub high_stress: u8,
    pub excessive_screen_time: u8,
    pub mobile_user: u8,
    pub sleep_deprivation: u8,
    pub mood_stress_difference: i64,
    pub engagement_score: f64,
    pub mood_sentiment_interaction: f64,
    /// Number of physical risk conditions met (0-4)
    pub physical_risk_score: u8,
    pub routine_disruption_score: f64,

    /// Always 0: the scaler was fitted on a table that still held the label
    /// columns, so they must be present in the layout. Not a prediction.
    pub anxiety_score: f64,
    /// Always 0, see `anxiety_score`.
    pub depression_score: f64,
}

impl FeatureVector {
    /// Look up a feature by its column name
    pub fn value(&self, column: &str) -> Option<f64> {
        let value = match column {
            "HeartRate" => self.heart_rate as f64,
            "SleepHours" => self.sleep_hours,
            "ActivityLevel" => self.activity_level as f64,
            "BodyTemperature" => self.body_temperature,
            "SocialPosts" => self.social_posts as f64,
            "InteractionFrequency" => self.interaction_frequency as f64,
            "ScreenTime" => self.screen_time,
            "LocationChanges" => self.location_changes as f64,
            "CalendarEvents" => self.calendar_events as f64,
            "Mood" => self.mood as f64,
            "StressLevel" => self.stress_level as f64,
            "DailyReflections" => self.daily_reflections as f64,
            "PostSentiment" => self.post_sentiment,
            "CommentSentiment" => self.comment_sentiment,
            "StatusSentiment" => self.status_sentiment,
            "AverageSentiment" => self.average_sentiment,
            "SentimentVariance" => self.sentiment_variance,
            "MoodStressRatio" => self.mood_stress_ratio,
            "InteractionPostRatio" => self.interaction_post_ratio,
            "ActiveHours" => self.active_hours,
            "ScreenTimePercentage" => self.screen_time_percentage,
            "HighStress" => self.high_stress as f64,
            "ExcessiveScreenTime" => self.excessive_screen_time as f64,
            "MobileUser" => self.mobile_user as f64,
            "SleepDeprivation" => self.sleep_deprivation as f64,
            "MoodStressDifference" => self.mood_stress_difference as f64,
            "EngagementScore" => self.engagement_score,
            "MoodSentimentInteraction" => self.mood_sentiment_interaction,
            "PhysicalRiskScore" => self.physical_risk_score as f64,
            "RoutineDisruptionScore" => self.routine_disruption_score,
            "AnxietyScore" => self.anxiety_score,
            "DepressionScore" => self.depression_score,
            _ => return None,
        };
        Some(value)
    }

    /// All columns with their values, in `FEATURE_COLUMNS` order
    pub fn to_columns(&self) -> Vec<(&'static str, f64)> {
        FEATURE_COLUMNS
            .iter()
            .filter_map(|&column| self.value(column).map(|v| (column, v)))
            .collect()
    }
}

/// Feature vector restricted to the scaler's columns, after scaling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledFeatureVector {
    pub columns: Vec<String>,
    pub values: Vec<f64>,
}

impl ScaledFeatureVector {
    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|idx| self.values[idx])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The single projected vector shared by every model in the ensemble
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInput {
    pub columns: Vec<String>,
    pub values: Vec<f64>,
}

impl ModelInput {
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Ensemble outputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predictions {
    /// Anxiety regressor output (fraction, displayed ×100)
    pub anxiety_score: f64,
    /// Depression regressor output (fraction, displayed ×100)
    pub depression_score: f64,
    /// Decoded anxiety level label
    pub anxiety_level: String,
    /// Decoded depression level label
    pub depression_level: String,
    /// Stress classifier predicted class 1
    pub high_stress: bool,
}

/// Output metric identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    AnxietyScore,
    DepressionScore,
    AnxietyLevel,
    DepressionLevel,
    HighStress,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::AnxietyScore => "anxiety_score",
            Metric::DepressionScore => "depression_score",
            Metric::AnxietyLevel => "anxiety_level",
            Metric::DepressionLevel => "depression_level",
            Metric::HighStress => "high_stress",
        }
    }
}

/// A metric that could not be produced in partial mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricFailure {
    pub metric: Metric,
    pub message: String,
}

/// Ensemble outputs where individual metrics may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialPredictions {
    pub anxiety_score: Option<f64>,
    pub depression_score: Option<f64>,
    pub anxiety_level: Option<String>,
    pub depression_level: Option<String>,
    pub high_stress: Option<bool>,
}

impl From<Predictions> for PartialPredictions {
    fn from(p: Predictions) -> Self {
        Self {
            anxiety_score: Some(p.anxiety_score),
            depression_score: Some(p.depression_score),
            anxiety_level: Some(p.anxiety_level),
            depression_level: Some(p.depression_level),
            high_stress: Some(p.high_stress),
        }
    }
}

/// Complete result of one strict pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub sentiment: SentimentTriple,
    pub features: FeatureVector,
    pub model_input: ModelInput,
    pub predictions: Predictions,
}

/// Result of a pipeline run that tolerates individual model failures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartialAssessment {
    pub sentiment: SentimentTriple,
    pub features: FeatureVector,
    pub model_input: ModelInput,
    pub predictions: PartialPredictions,
    pub failures: Vec<MetricFailure>,
}

impl PartialAssessment {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl From<Assessment> for PartialAssessment {
    fn from(a: Assessment) -> Self {
        Self {
            sentiment: a.sentiment,
            features: a.features,
            model_input: a.model_input,
            predictions: a.predictions.into(),
            failures: Vec::new(),
        }
    }
}

/// Insight payload producer metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Displayed insights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insights {
    pub anxiety_score: Option<f64>,
    pub anxiety_score_display: Option<String>,
    pub depression_score: Option<f64>,
    pub depression_score_display: Option<String>,
    pub high_stress: Option<bool>,
    pub high_stress_display: Option<String>,
    pub anxiety_level: Option<String>,
    pub depression_level: Option<String>,
}

/// Complete insight payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightPayload {
    pub schema_version: String,
    pub producer: InsightProducer,
    pub computed_at_utc: String,
    pub sentiment: SentimentTriple,
    pub insights: Insights,
    pub failures: Vec<MetricFailure>,
}
