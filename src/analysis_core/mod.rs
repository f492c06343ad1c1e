//! Analysis Core - Mood Clustering, Event Detection and Trends
//!
//! This module turns a snapshot of mood observations into events, area moods
//! and trend reports. Every component is a pure function of its input and the
//! [`AnalyzerConfig`](crate::config::AnalyzerConfig) it was built from.
//!
//! # Architecture
//!
//! ```text
//! JSONL snapshot → load_snapshot → ObservationFilter
//!     ↓
//! Clusterer (seed radius + time window, haversine distance)
//!     ↓
//! EventClassifier (keyword coverage + base bonus, confidence floor)
//!
//! AreaAggregator (disc filter → dominant emoji + mood percentage)
//! TrendComputer  (N periods → mood percentages + direction)
//! ```

pub mod analyzer;
pub mod area;
pub mod classifier;
pub mod clusterer;
pub mod filter;
pub mod geo;
pub mod mood;
pub mod observation;
pub mod snapshot;
pub mod trend;

pub use analyzer::MoodAnalyzer;
pub use area::{AreaAggregator, AreaMood};
pub use classifier::{Classification, Event, EventClassifier, EventType, EVENT_KEYWORDS};
pub use clusterer::{Cluster, Clusterer};
pub use filter::ObservationFilter;
pub use geo::{haversine_km, GeoPoint, EARTH_RADIUS_KM};
pub use mood::{dominant_emoji, mood_percentage, MoodClass, NEUTRAL_DEFAULT_EMOJI};
pub use observation::{Observation, ObservationError, ObservationRecord};
pub use snapshot::{load_snapshot, Snapshot};
pub use trend::{TrendComputer, TrendDirection, TrendReport};
