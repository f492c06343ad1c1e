//! One entry point over the three analysis flows

use chrono::{DateTime, Utc};

use super::area::{AreaAggregator, AreaMood};
use super::classifier::{Event, EventClassifier};
use super::clusterer::{Cluster, Clusterer};
use super::geo::GeoPoint;
use super::observation::Observation;
use super::trend::{TrendComputer, TrendReport};
use crate::config::AnalyzerConfig;

/// Components built from a single [`AnalyzerConfig`]
///
/// Holds no state between calls; every method is a pure function of its
/// arguments.
pub struct MoodAnalyzer {
    config: AnalyzerConfig,
    clusterer: Clusterer,
    classifier: EventClassifier,
    area: AreaAggregator,
    trend: TrendComputer,
}

impl MoodAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            clusterer: Clusterer::from_config(&config),
            classifier: EventClassifier::from_config(&config),
            area: AreaAggregator::from_config(&config),
            trend: TrendComputer::from_config(&config),
            config,
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn clusters(&self, observations: &[Observation]) -> Vec<Cluster> {
        self.clusterer.cluster(observations)
    }

    pub fn detect_events(&self, observations: &[Observation]) -> Vec<Event> {
        let clusters = self.clusterer.cluster(observations);
        self.classifier.detect_events(&clusters)
    }

    /// Like [`detect_events`](Self::detect_events) with a caller-chosen floor
    ///
    /// The floor can only be raised above the configured one.
    pub fn detect_events_with_floor(
        &self,
        observations: &[Observation],
        min_confidence: u8,
    ) -> Vec<Event> {
        let clusters = self.clusterer.cluster(observations);
        self.classifier
            .detect_events_with_floor(&clusters, min_confidence)
    }

    pub fn area_mood(
        &self,
        observations: &[Observation],
        center: GeoPoint,
        radius_km: Option<f64>,
    ) -> AreaMood {
        self.area.aggregate(observations, center, radius_km)
    }

    /// Trend report over `span_hours`, or the configured span when `None`
    pub fn trends(
        &self,
        observations: &[Observation],
        span_hours: Option<f64>,
        now: DateTime<Utc>,
    ) -> TrendReport {
        let span_hours = span_hours.unwrap_or(self.config.trend_span_hours);
        self.trend.compute(observations, span_hours, now)
    }
}

impl Default for MoodAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}
