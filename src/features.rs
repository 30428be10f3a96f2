//! Feature engineering
//!
//! This module turns a raw form submission and its sentiment scores into the
//! exact feature vector the pre-trained models expect:
//! - Sentiment aggregates (mean, variance, mood interaction)
//! - Ratios and rates (mood/stress, interactions/post, active hours)
//! - Threshold flags and the physical risk count
//! - Placeholder label columns required by the fitted scaler

use crate::schema::RawInput;
use crate::types::{FeatureVector, SentimentTriple};

/// Added to denominators that may be zero
pub const EPSILON: f64 = 1e-5;

/// Steps per active hour
const STEPS_PER_ACTIVE_HOUR: f64 = 2000.0;

/// Feature builder for the wellness feature vector
pub struct FeatureBuilder;

impl FeatureBuilder {
    /// Build the feature vector for one submission
    pub fn build(input: &RawInput, sentiment: SentimentTriple) -> FeatureVector {
        let sentiments = sentiment.as_array();
        let average_sentiment = mean(&sentiments);

        FeatureVector {
            heart_rate: input.heart_rate,
            sleep_hours: input.sleep_hours,
            activity_level: input.activity_level,
            body_temperature: input.body_temp,
            social_posts: input.social_posts,
            interaction_frequency: input.interaction_freq,
            screen_time: input.screen_time,
            location_changes: input.location_changes,
            calendar_events: input.calendar_events,
            mood: input.mood,
            stress_level: input.stress,
            daily_reflections: input.daily_reflections,
            post_sentiment: sentiment.post,
            comment_sentiment: sentiment.comment,
            status_sentiment: sentiment.status,

            average_sentiment,
            sentiment_variance: population_variance(&sentiments),
            mood_stress_ratio: input.mood as f64 / (input.stress as f64 + EPSILON),
            interaction_post_ratio: input.interaction_freq as f64
                / (input.social_posts as f64 + EPSILON),
            active_hours: input.activity_level as f64 / STEPS_PER_ACTIVE_HOUR,
            screen_time_percentage: input.screen_time / 24.0,
            high_stress: flag(input.stress > 7),
            excessive_screen_time: flag(input.screen_time > 6.0),
            mobile_user: flag(input.location_changes > 3),
            sleep_deprivation: flag(input.sleep_hours < 3.0),
            mood_stress_difference: input.mood as i64 - input.stress as i64,
            engagement_score: input.social_posts as f64
                + input.interaction_freq as f64
                + input.screen_time,
            mood_sentiment_interaction: input.mood as f64 * average_sentiment,
            physical_risk_score: physical_risk_score(input),
            routine_disruption_score: population_variance(&[
                input.location_changes as f64,
                input.calendar_events as f64,
            ]),

            anxiety_score: 0.0,
            depression_score: 0.0,
        }
    }
}

/// Count of physical risk conditions met (0-4)
fn physical_risk_score(input: &RawInput) -> u8 {
    let conditions = [
        input.heart_rate > 85 || input.heart_rate < 60,
        input.sleep_hours > 9.0 || input.sleep_hours < 3.0,
        input.activity_level < 700,
        input.body_temp > 97.0,
    ];
    conditions.iter().filter(|&&met| met).count() as u8
}

fn flag(condition: bool) -> u8 {
    u8::from(condition)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (divides by n)
fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FEATURE_COLUMNS;

    fn neutral() -> SentimentTriple {
        SentimentTriple::default()
    }

    #[test]
    fn test_default_form_features() {
        let input = RawInput::default();
        let features = FeatureBuilder::build(&input, neutral());

        assert_eq!(features.average_sentiment, 0.0);
        assert_eq!(features.sentiment_variance, 0.0);
        assert_eq!(features.mood_stress_ratio, 6.0 / (5.0 + EPSILON));
        assert!((features.mood_stress_ratio - 1.19998).abs() < 1e-4);
        assert_eq!(features.active_hours, 2.0);
        assert_eq!(features.screen_time_percentage, 0.25);
        assert_eq!(features.mood_stress_difference, 1);
        assert_eq!(features.engagement_score, 40.0);
        // Only body_temp 98.6 > 97 is met
        assert_eq!(features.physical_risk_score, 1);
        // var([3, 3]) = 0
        assert_eq!(features.routine_disruption_score, 0.0);
    }

    #[test]
    fn test_every_column_is_present_and_finite() {
        let inputs = [
            RawInput::default(),
            RawInput {
                social_posts: 0,
                stress: 1,
                screen_time: 0.0,
                ..Default::default()
            },
            RawInput {
                heart_rate: 120,
                sleep_hours: 12.0,
                activity_level: 20000,
                body_temp: 104.0,
                mood: 10,
                stress: 10,
                calendar_events: 10,
                daily_reflections: 10,
                social_posts: 20,
                interaction_freq: 100,
                screen_time: 24.0,
                location_changes: 10,
                ..Default::default()
            },
        ];

        for input in &inputs {
            let features = FeatureBuilder::build(input, neutral());
            let columns = features.to_columns();

            assert_eq!(columns.len(), FEATURE_COLUMNS.len());
            for (expected, (column, value)) in FEATURE_COLUMNS.iter().zip(&columns) {
                assert_eq!(expected, column);
                assert!(value.is_finite(), "{column} is not finite");
            }
        }
    }

    #[test]
    fn test_sentiment_aggregates() {
        let sentiment = SentimentTriple {
            post: 0.6,
            comment: -0.3,
            status: 0.0,
        };
        let input = RawInput {
            mood: 4,
            ..Default::default()
        };
        let features = FeatureBuilder::build(&input, sentiment);

        assert!((features.average_sentiment - 0.1).abs() < 1e-12);
        // ((0.5)^2 + (-0.4)^2 + (-0.1)^2) / 3 = 0.14
        assert!((features.sentiment_variance - 0.14).abs() < 1e-12);
        assert!((features.mood_sentiment_interaction - 0.4).abs() < 1e-12);
        assert_eq!(features.post_sentiment, 0.6);
        assert_eq!(features.comment_sentiment, -0.3);
    }

    #[test]
    fn test_flags_use_strict_thresholds() {
        let at_threshold = RawInput {
            stress: 7,
            screen_time: 6.0,
            location_changes: 3,
            sleep_hours: 3.0,
            ..Default::default()
        };
        let features = FeatureBuilder::build(&at_threshold, neutral());
        assert_eq!(features.high_stress, 0);
        assert_eq!(features.excessive_screen_time, 0);
        assert_eq!(features.mobile_user, 0);
        assert_eq!(features.sleep_deprivation, 0);

        let past_threshold = RawInput {
            stress: 8,
            screen_time: 6.5,
            location_changes: 4,
            sleep_hours: 2.5,
            ..Default::default()
        };
        let features = FeatureBuilder::build(&past_threshold, neutral());
        assert_eq!(features.high_stress, 1);
        assert_eq!(features.excessive_screen_time, 1);
        assert_eq!(features.mobile_user, 1);
        assert_eq!(features.sleep_deprivation, 1);
    }

    #[test]
    fn test_physical_risk_score_bounds() {
        let none = RawInput {
            body_temp: 97.0,
            ..Default::default()
        };
        assert_eq!(FeatureBuilder::build(&none, neutral()).physical_risk_score, 0);

        let all = RawInput {
            heart_rate: 50,
            sleep_hours: 10.0,
            activity_level: 100,
            body_temp: 100.0,
            ..Default::default()
        };
        assert_eq!(FeatureBuilder::build(&all, neutral()).physical_risk_score, 4);

        for heart_rate in [40, 59, 60, 85, 86, 120] {
            for sleep_hours in [0.0, 2.5, 3.0, 9.0, 9.5, 12.0] {
                let input = RawInput {
                    heart_rate,
                    sleep_hours,
                    ..Default::default()
                };
                let score = FeatureBuilder::build(&input, neutral()).physical_risk_score;
                assert!(score <= 4);
            }
        }
    }

    #[test]
    fn test_mood_stress_difference_is_signed_integer() {
        let input = RawInput {
            mood: 2,
            stress: 9,
            ..Default::default()
        };
        assert_eq!(FeatureBuilder::build(&input, neutral()).mood_stress_difference, -7);
    }

    #[test]
    fn test_zero_posts_does_not_divide_by_zero() {
        let input = RawInput {
            social_posts: 0,
            interaction_freq: 10,
            ..Default::default()
        };
        let features = FeatureBuilder::build(&input, neutral());
        // 10 / 1e-5
        assert!((features.interaction_post_ratio - 1_000_000.0).abs() < 1e-3);
    }

    #[test]
    fn test_routine_disruption_variance() {
        let input = RawInput {
            location_changes: 8,
            calendar_events: 2,
            ..Default::default()
        };
        // var([8, 2]) = 9
        assert_eq!(FeatureBuilder::build(&input, neutral()).routine_disruption_score, 9.0);
    }

    #[test]
    fn test_placeholder_label_columns_are_zero() {
        let features = FeatureBuilder::build(&RawInput::default(), neutral());
        assert_eq!(features.value("AnxietyScore"), Some(0.0));
        assert_eq!(features.value("DepressionScore"), Some(0.0));
    }
}
