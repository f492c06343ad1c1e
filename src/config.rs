//! Analyzer configuration from environment variables

use std::env;

/// Tunables shared by every analysis component
///
/// Loaded from environment variables with the production defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    /// Maximum distance from a cluster seed, in kilometers
    pub cluster_radius_km: f64,

    /// Maximum time difference from a cluster seed, in hours
    pub cluster_time_window_hours: f64,

    /// Candidates smaller than this are discarded
    pub min_cluster_size: usize,

    /// Events below this confidence are dropped
    pub min_confidence: u8,

    /// Radius used for area mood when the caller gives none, in kilometers
    pub area_radius_km: f64,

    /// Number of trend periods
    pub trend_buckets: usize,

    /// Span covered by a trend report when the caller gives none, in hours
    pub trend_span_hours: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            cluster_radius_km: 1.0,
            cluster_time_window_hours: 4.0,
            min_cluster_size: 5,
            min_confidence: 30,
            area_radius_km: 5.0,
            trend_buckets: 6,
            trend_span_hours: 24.0,
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `MOODFLOW_CLUSTER_RADIUS_KM` (default: 1.0)
    /// - `MOODFLOW_TIME_WINDOW_HOURS` (default: 4.0)
    /// - `MOODFLOW_MIN_CLUSTER_SIZE` (default: 5)
    /// - `MOODFLOW_MIN_CONFIDENCE` (default: 30)
    /// - `MOODFLOW_AREA_RADIUS_KM` (default: 5.0)
    /// - `MOODFLOW_TREND_BUCKETS` (default: 6)
    /// - `MOODFLOW_TREND_SPAN_HOURS` (default: 24.0)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            cluster_radius_km: env::var("MOODFLOW_CLUSTER_RADIUS_KM")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.cluster_radius_km),

            cluster_time_window_hours: env::var("MOODFLOW_TIME_WINDOW_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.cluster_time_window_hours),

            min_cluster_size: env::var("MOODFLOW_MIN_CLUSTER_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.min_cluster_size),

            min_confidence: env::var("MOODFLOW_MIN_CONFIDENCE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.min_confidence),

            area_radius_km: env::var("MOODFLOW_AREA_RADIUS_KM")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.area_radius_km),

            trend_buckets: env::var("MOODFLOW_TREND_BUCKETS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.trend_buckets),

            trend_span_hours: env::var("MOODFLOW_TREND_SPAN_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.trend_span_hours),
        }
    }
}
