//! wellness.raw_input.v1 schema definition
//!
//! One `RawInput` is produced per form submission and consumed immediately.
//! Every field is optional on the wire; missing fields take the form defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current input schema version
pub const SCHEMA_VERSION: &str = "wellness.raw_input.v1";

/// Self-reported wellness signals from a single form submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawInput {
    /// Heart rate (bpm)
    pub heart_rate: u32,
    /// Sleep duration (hours)
    pub sleep_hours: f64,
    /// Activity level (steps)
    pub activity_level: u32,
    /// Body temperature (°F)
    pub body_temp: f64,
    /// Mood (1-10)
    pub mood: u32,
    /// Stress level (1-10)
    pub stress: u32,
    /// Calendar events today
    pub calendar_events: u32,
    /// Daily reflections written
    pub daily_reflections: u32,
    /// Social posts made
    pub social_posts: u32,
    /// Interaction frequency
    pub interaction_freq: u32,
    /// Screen time (hours)
    pub screen_time: f64,
    /// Location changes
    pub location_changes: u32,
    /// Free-text posts
    pub posts: String,
    /// Free-text comments on posts
    pub comments: String,
    /// Free-text status updates
    pub status: String,
}

impl Default for RawInput {
    fn default() -> Self {
        Self {
            heart_rate: 72,
            sleep_hours: 7.0,
            activity_level: 4000,
            body_temp: 98.6,
            mood: 6,
            stress: 5,
            calendar_events: 3,
            daily_reflections: 3,
            social_posts: 4,
            interaction_freq: 30,
            screen_time: 6.0,
            location_changes: 3,
            posts: String::new(),
            comments: String::new(),
            status: String::new(),
        }
    }
}

/// Allowed inclusive range for a numeric input field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRange {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
}

/// Ranges enforced by the form controls
pub const FIELD_RANGES: [FieldRange; 12] = [
    FieldRange { field: "heart_rate", min: 40.0, max: 120.0 },
    FieldRange { field: "sleep_hours", min: 0.0, max: 12.0 },
    FieldRange { field: "activity_level", min: 0.0, max: 20000.0 },
    FieldRange { field: "body_temp", min: 95.0, max: 104.0 },
    FieldRange { field: "mood", min: 1.0, max: 10.0 },
    FieldRange { field: "stress", min: 1.0, max: 10.0 },
    FieldRange { field: "calendar_events", min: 0.0, max: 10.0 },
    FieldRange { field: "daily_reflections", min: 0.0, max: 10.0 },
    FieldRange { field: "social_posts", min: 0.0, max: 20.0 },
    FieldRange { field: "interaction_freq", min: 0.0, max: 100.0 },
    FieldRange { field: "screen_time", min: 0.0, max: 24.0 },
    FieldRange { field: "location_changes", min: 0.0, max: 10.0 },
];

impl RawInput {
    /// Numeric fields paired with their current values, in `FIELD_RANGES` order
    pub fn numeric_fields(&self) -> [(&'static str, f64); 12] {
        [
            ("heart_rate", self.heart_rate as f64),
            ("sleep_hours", self.sleep_hours),
            ("activity_level", self.activity_level as f64),
            ("body_temp", self.body_temp),
            ("mood", self.mood as f64),
            ("stress", self.stress as f64),
            ("calendar_events", self.calendar_events as f64),
            ("daily_reflections", self.daily_reflections as f64),
            ("social_posts", self.social_posts as f64),
            ("interaction_freq", self.interaction_freq as f64),
            ("screen_time", self.screen_time),
            ("location_changes", self.location_changes as f64),
        ]
    }

    /// Validate that every numeric field is finite and within its form range
    pub fn validate(&self) -> Result<(), ValidationError> {
        for ((field, value), range) in self.numeric_fields().into_iter().zip(FIELD_RANGES) {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite {
                    field: field.to_string(),
                });
            }
            if value < range.min || value > range.max {
                return Err(ValidationError::OutOfRange {
                    field: field.to_string(),
                    value,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        Ok(())
    }

    /// Collect every validation problem instead of stopping at the first
    pub fn validation_errors(&self) -> Vec<ValidationError> {
        self.numeric_fields()
            .into_iter()
            .zip(FIELD_RANGES)
            .filter_map(|((field, value), range)| {
                if !value.is_finite() {
                    Some(ValidationError::NonFinite {
                        field: field.to_string(),
                    })
                } else if value < range.min || value > range.max {
                    Some(ValidationError::OutOfRange {
                        field: field.to_string(),
                        value,
                        min: range.min,
                        max: range.max,
                    })
                } else {
                    None
                }
            })
            .collect()
    }
}

/// Validation errors for raw input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field {field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Field {field} is not a finite number")]
    NonFinite { field: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_form() {
        let input = RawInput::default();
        assert_eq!(input.heart_rate, 72);
        assert_eq!(input.sleep_hours, 7.0);
        assert_eq!(input.activity_level, 4000);
        assert_eq!(input.body_temp, 98.6);
        assert_eq!(input.mood, 6);
        assert_eq!(input.stress, 5);
        assert!(input.posts.is_empty());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_input() {
        let json = r#"{ "heart_rate": 90, "posts": "Feeling great today!" }"#;
        let input: RawInput = serde_json::from_str(json).unwrap();

        assert_eq!(input.heart_rate, 90);
        assert_eq!(input.posts, "Feeling great today!");
        // Untouched fields keep form defaults
        assert_eq!(input.screen_time, 6.0);
        assert_eq!(input.location_changes, 3);
    }

    #[test]
    fn test_validation_out_of_range() {
        let input = RawInput {
            stress: 0,
            ..Default::default()
        };

        let err = input.validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                field: "stress".to_string(),
                value: 0.0,
                min: 1.0,
                max: 10.0,
            }
        );
    }

    #[test]
    fn test_validation_non_finite() {
        let input = RawInput {
            sleep_hours: f64::NAN,
            ..Default::default()
        };

        assert!(matches!(
            input.validate(),
            Err(ValidationError::NonFinite { ref field }) if field == "sleep_hours"
        ));
    }

    #[test]
    fn test_validation_errors_collects_all() {
        let input = RawInput {
            heart_rate: 200,
            body_temp: 90.0,
            screen_time: 25.0,
            ..Default::default()
        };

        let errors = input.validation_errors();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_range_boundaries_are_inclusive() {
        let input = RawInput {
            heart_rate: 40,
            sleep_hours: 12.0,
            activity_level: 20000,
            body_temp: 104.0,
            mood: 1,
            stress: 10,
            social_posts: 0,
            ..Default::default()
        };

        assert!(input.validate().is_ok());
    }
}
