//! Mood summary for a disc around a point

use serde::Serialize;

use super::geo::GeoPoint;
use super::mood::{dominant_emoji, mood_percentage, NEUTRAL_DEFAULT_EMOJI};
use super::observation::Observation;
use crate::config::AnalyzerConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaMood {
    pub dominant_emoji: String,
    pub mood_percentage: u8,
    pub moods_count: usize,
}

impl AreaMood {
    pub fn neutral() -> Self {
        Self {
            dominant_emoji: NEUTRAL_DEFAULT_EMOJI.to_string(),
            mood_percentage: 50,
            moods_count: 0,
        }
    }
}

/// Summarizes mood for the observations inside a disc
pub struct AreaAggregator {
    default_radius_km: f64,
}

impl AreaAggregator {
    pub fn new(default_radius_km: f64) -> Self {
        Self { default_radius_km }
    }

    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self::new(config.area_radius_km)
    }

    pub fn with_defaults() -> Self {
        Self::from_config(&AnalyzerConfig::default())
    }

    pub fn default_radius_km(&self) -> f64 {
        self.default_radius_km
    }

    /// Summarize observations within `radius_km` of `center`
    ///
    /// Uses the configured default radius when `radius_km` is `None`. An area
    /// with no observations yields [`AreaMood::neutral`].
    pub fn aggregate(
        &self,
        observations: &[Observation],
        center: GeoPoint,
        radius_km: Option<f64>,
    ) -> AreaMood {
        let radius_km = radius_km.unwrap_or(self.default_radius_km);

        let in_area: Vec<&Observation> = observations
            .iter()
            .filter(|obs| center.distance_km(&obs.location()) <= radius_km)
            .collect();

        if in_area.is_empty() {
            return AreaMood::neutral();
        }

        AreaMood {
            dominant_emoji: dominant_emoji(in_area.iter().copied())
                .unwrap_or(NEUTRAL_DEFAULT_EMOJI)
                .to_string(),
            mood_percentage: mood_percentage(in_area.iter().copied()),
            moods_count: in_area.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn create_test_observation(id: u64, emoji: &str, latitude: f64, longitude: f64) -> Observation {
        Observation {
            id,
            emoji: emoji.to_string(),
            text: String::new(),
            latitude,
            longitude,
            timestamp: Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap(),
            user_id: 1,
        }
    }

    #[test]
    fn test_empty_input_is_neutral() {
        let mood = AreaAggregator::with_defaults().aggregate(&[], GeoPoint::new(55.75, 37.61), None);

        assert_eq!(
            mood,
            AreaMood {
                dominant_emoji: "😐".to_string(),
                mood_percentage: 50,
                moods_count: 0,
            }
        );
    }

    #[test]
    fn test_observations_elsewhere_are_ignored() {
        // Saint Petersburg observations, Moscow query
        let obs = vec![
            create_test_observation(1, "😡", 59.9343, 30.3351),
            create_test_observation(2, "😡", 59.9350, 30.3360),
        ];

        let mood = AreaAggregator::with_defaults().aggregate(&obs, GeoPoint::new(55.7558, 37.6173), Some(5.0));
        assert_eq!(mood, AreaMood::neutral());
    }

    #[test]
    fn test_area_summary() {
        let obs = vec![
            create_test_observation(1, "😊", 55.7558, 37.6173),
            create_test_observation(2, "😢", 55.7600, 37.6200),
            create_test_observation(3, "😊", 55.7500, 37.6100),
            create_test_observation(4, "😐", 55.7580, 37.6150),
            // ~33km away, outside the default 5km radius
            create_test_observation(5, "😢", 56.0558, 37.6173),
        ];

        let mood = AreaAggregator::with_defaults().aggregate(&obs, GeoPoint::new(55.7558, 37.6173), None);

        assert_eq!(mood.moods_count, 4);
        assert_eq!(mood.dominant_emoji, "😊");
        // (2 + 1/2) / 4 * 100 = 62.5 -> 62
        assert_eq!(mood.mood_percentage, 62);
    }

    #[test]
    fn test_radius_override() {
        let obs = vec![
            create_test_observation(1, "😊", 55.7558, 37.6173),
            create_test_observation(2, "😢", 55.7738, 37.6173),
        ];
        let aggregator = AreaAggregator::with_defaults();
        let center = GeoPoint::new(55.7558, 37.6173);

        assert_eq!(aggregator.aggregate(&obs, center, Some(1.0)).moods_count, 1);
        assert_eq!(aggregator.aggregate(&obs, center, None).moods_count, 2);
    }
}
