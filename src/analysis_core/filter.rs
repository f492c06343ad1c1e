//! Snapshot pre-filtering by time, emoji and area
//!
//! Applies the same narrowing the serving layer performs before it hands a
//! snapshot to the analysis components.

use chrono::{DateTime, Utc};

use super::geo::GeoPoint;
use super::observation::Observation;
use super::trend::millis_before;

#[derive(Debug, Clone, Default)]
pub struct ObservationFilter {
    since: Option<DateTime<Utc>>,
    emojis: Vec<String>,
    area: Option<(GeoPoint, f64)>,
}

impl ObservationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep observations strictly newer than `now - hours`
    ///
    /// Fractional hours are allowed. Spans reaching past the earliest
    /// representable instant keep everything.
    pub fn within_hours(mut self, hours: f64, now: DateTime<Utc>) -> Self {
        self.since = Some(millis_before(now, hours * 3_600_000.0));
        self
    }

    /// Keep observations carrying one of `emojis`; an empty list keeps all
    pub fn with_emojis<I, S>(mut self, emojis: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.emojis = emojis.into_iter().map(Into::into).collect();
        self
    }

    /// Keep observations within `radius_km` of `center`
    pub fn within_radius(mut self, center: GeoPoint, radius_km: f64) -> Self {
        self.area = Some((center, radius_km));
        self
    }

    pub fn matches(&self, obs: &Observation) -> bool {
        if let Some(since) = self.since {
            if obs.timestamp <= since {
                return false;
            }
        }

        if !self.emojis.is_empty() && !self.emojis.iter().any(|e| *e == obs.emoji) {
            return false;
        }

        if let Some((center, radius_km)) = self.area {
            if center.distance_km(&obs.location()) > radius_km {
                return false;
            }
        }

        true
    }

    pub fn apply(&self, observations: &[Observation]) -> Vec<Observation> {
        observations
            .iter()
            .filter(|obs| self.matches(obs))
            .cloned()
            .collect()
    }
}
