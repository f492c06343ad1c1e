//! Spatial-temporal clustering of observations around seed observations

use chrono::Duration;
use serde::Serialize;

use super::geo::GeoPoint;
use super::mood::{dominant_emoji, mood_percentage, NEUTRAL_DEFAULT_EMOJI};
use super::observation::Observation;
use crate::config::AnalyzerConfig;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    /// Arithmetic mean of member coordinates
    pub center: GeoPoint,
    /// Seed first, then the other members in most-recent-first order
    pub members: Vec<Observation>,
    pub dominant_emoji: String,
    pub mood_percentage: u8,
}

impl Cluster {
    fn from_members(members: Vec<Observation>) -> Self {
        let n = members.len() as f64;
        let lat_sum: f64 = members.iter().map(|m| m.latitude).sum();
        let lon_sum: f64 = members.iter().map(|m| m.longitude).sum();

        let dominant_emoji = dominant_emoji(&members)
            .unwrap_or(NEUTRAL_DEFAULT_EMOJI)
            .to_string();
        let mood_percentage = mood_percentage(&members);

        Self {
            center: GeoPoint::new(lat_sum / n, lon_sum / n),
            members,
            dominant_emoji,
            mood_percentage,
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Groups observations that are close to a seed in both space and time
///
/// Candidates are compared against the seed only, never against other
/// members, so membership is not transitive. Runs in O(n²); callers should
/// bound the input by time and area first.
#[derive(Debug, Clone)]
pub struct Clusterer {
    radius_km: f64,
    time_window: Duration,
    min_cluster_size: usize,
}

impl Clusterer {
    pub fn new(radius_km: f64, time_window: Duration, min_cluster_size: usize) -> Self {
        Self {
            radius_km,
            time_window,
            min_cluster_size,
        }
    }

    pub fn from_config(config: &AnalyzerConfig) -> Self {
        let window_us = (config.cluster_time_window_hours * 3_600_000_000.0) as i64;
        Self::new(
            config.cluster_radius_km,
            Duration::microseconds(window_us),
            config.min_cluster_size,
        )
    }

    pub fn with_defaults() -> Self {
        Self::from_config(&AnalyzerConfig::default())
    }

    /// Build clusters, seeding from the most recent observation first
    ///
    /// Members of a discarded (undersized) candidate stay assigned and are
    /// never offered to a later seed.
    pub fn cluster(&self, observations: &[Observation]) -> Vec<Cluster> {
        let mut sorted: Vec<&Observation> = observations.iter().collect();
        // Stable sort keeps input order among equal timestamps
        sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let mut assigned = vec![false; sorted.len()];
        let mut clusters = Vec::new();

        for seed_idx in 0..sorted.len() {
            if assigned[seed_idx] {
                continue;
            }

            let seed = sorted[seed_idx];
            let seed_location = seed.location();
            assigned[seed_idx] = true;
            let mut members = vec![seed.clone()];

            for (idx, other) in sorted.iter().enumerate() {
                if assigned[idx] {
                    continue;
                }

                let time_diff = seed.timestamp - other.timestamp;
                if time_diff > self.time_window || -time_diff > self.time_window {
                    continue;
                }

                if seed_location.distance_km(&other.location()) <= self.radius_km {
                    assigned[idx] = true;
                    members.push((*other).clone());
                }
            }

            if members.len() >= self.min_cluster_size {
                log::debug!(
                    "Cluster retained: seed={} members={}",
                    seed.id,
                    members.len()
                );
                clusters.push(Cluster::from_members(members));
            } else {
                log::debug!(
                    "Candidate discarded: seed={} members={} (min {})",
                    seed.id,
                    members.len(),
                    self.min_cluster_size
                );
            }
        }

        clusters
    }
}
