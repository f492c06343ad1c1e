//! # moodflow
//!
//! Situational insight from geolocated mood observations.
//!
//! Each observation is an emoji, an optional line of text, a coordinate and a
//! timestamp. The analysis core turns a snapshot of observations into:
//!
//! - **events**: spatial-temporal clusters classified by keywords in their text
//! - **area mood**: a mood summary for a disc around a point
//! - **trends**: mood bucketed over a time span, with a direction signal
//!
//! Everything here is pure computation over a caller-supplied snapshot. Loading
//! and filtering helpers mirror what the serving layer does before it calls in.

pub mod analysis_core;
pub mod config;

pub use analysis_core::{
    AreaAggregator, AreaMood, Cluster, Clusterer, Event, EventClassifier, EventType,
    GeoPoint, MoodAnalyzer, MoodClass, Observation, ObservationError, ObservationFilter,
    TrendComputer, TrendDirection, TrendReport,
};
pub use config::AnalyzerConfig;
