//! Insight encoding
//!
//! This module encodes assessments into insight payloads, adding the display
//! strings shown to the user and producer metadata.

use chrono::Utc;
use uuid::Uuid;

use crate::error::ComputeError;
use crate::types::{InsightPayload, InsightProducer, Insights, PartialAssessment};
use crate::{MINDFLUX_VERSION, PRODUCER_NAME};

/// Current insight payload schema version
pub const INSIGHT_SCHEMA_VERSION: &str = "wellness.insight.v1";

/// Format a regressor output as a score out of 100
pub fn format_score(score: f64) -> String {
    format!("{:.2} / 100", score * 100.0)
}

/// Format the stress classifier output
pub fn format_flag(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Insight encoder for producing payloads
pub struct InsightEncoder {
    instance_id: String,
}

impl Default for InsightEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    /// Encode an assessment into an insight payload
    pub fn encode(&self, assessment: &PartialAssessment) -> InsightPayload {
        let p = &assessment.predictions;

        let insights = Insights {
            anxiety_score: p.anxiety_score,
            anxiety_score_display: p.anxiety_score.map(format_score),
            depression_score: p.depression_score,
            depression_score_display: p.depression_score.map(format_score),
            high_stress: p.high_stress,
            high_stress_display: p.high_stress.map(|f| format_flag(f).to_string()),
            anxiety_level: p.anxiety_level.clone(),
            depression_level: p.depression_level.clone(),
        };

        InsightPayload {
            schema_version: INSIGHT_SCHEMA_VERSION.to_string(),
            producer: InsightProducer {
                name: PRODUCER_NAME.to_string(),
                version: MINDFLUX_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            computed_at_utc: Utc::now().to_rfc3339(),
            sentiment: assessment.sentiment,
            insights,
            failures: assessment.failures.clone(),
        }
    }

    /// Encode to a pretty-printed JSON string
    pub fn encode_to_json(&self, assessment: &PartialAssessment) -> Result<String, ComputeError> {
        let payload = self.encode(assessment);
        serde_json::to_string_pretty(&payload).map_err(ComputeError::JsonError)
    }
}

/// Render a payload as the human-readable summary the form displays
pub fn render_text(payload: &InsightPayload) -> String {
    let i = &payload.insights;
    let unavailable = "unavailable".to_string();

    let mut lines = vec![
        "Predicted Mental Health Insights".to_string(),
        "================================".to_string(),
        format!(
            "Anxiety Score:    {}",
            i.anxiety_score_display.as_ref().unwrap_or(&unavailable)
        ),
        format!(
            "Depression Score: {}",
            i.depression_score_display.as_ref().unwrap_or(&unavailable)
        ),
        format!(
            "High Stress:      {}",
            i.high_stress_display.as_ref().unwrap_or(&unavailable)
        ),
        format!(
            "Predicted Anxiety Level:    {}",
            i.anxiety_level.as_ref().unwrap_or(&unavailable)
        ),
        format!(
            "Predicted Depression Level: {}",
            i.depression_level.as_ref().unwrap_or(&unavailable)
        ),
    ];

    if !payload.failures.is_empty() {
        lines.push(String::new());
        lines.push("Unavailable metrics:".to_string());
        for failure in &payload.failures {
            lines.push(format!("  - {}: {}", failure.metric.as_str(), failure.message));
        }
    }

    lines.join("\n") + "\n"
}
