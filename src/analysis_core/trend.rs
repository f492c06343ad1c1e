//! Time-bucketed mood trends

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::mood::mood_percentage;
use super::observation::Observation;
use crate::config::AnalyzerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Up => "up",
            TrendDirection::Down => "down",
            TrendDirection::Stable => "stable",
        }
    }

    /// Compare the most recent period against the one before it
    ///
    /// Older periods do not influence the direction.
    fn from_percentages(percentages: &[u8]) -> Self {
        match percentages {
            [latest, previous, ..] if latest > previous => TrendDirection::Up,
            [latest, previous, ..] if latest < previous => TrendDirection::Down,
            _ => TrendDirection::Stable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendReport {
    /// `"HH:MM - HH:MM"` labels, most recent first
    pub time_periods: Vec<String>,
    /// Per-period mood percentage, 0 for periods without observations
    pub mood_percentages: Vec<u8>,
    /// Emoji histogram over the whole input, not per period
    pub emoji_counts: BTreeMap<String, usize>,
    pub trend_direction: TrendDirection,
}

/// Splits a span ending at `now` into equal periods and scores each one
pub struct TrendComputer {
    buckets: usize,
}

impl TrendComputer {
    pub fn new(buckets: usize) -> Self {
        Self { buckets }
    }

    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self::new(config.trend_buckets)
    }

    pub fn with_defaults() -> Self {
        Self::from_config(&AnalyzerConfig::default())
    }

    /// Bucket `[now - span_hours, now]` into equal periods
    ///
    /// Period bounds are inclusive on both ends, so an observation sitting
    /// exactly on a boundary counts toward both neighbours. Non-positive or
    /// non-finite spans produce zero-length periods.
    pub fn compute(
        &self,
        observations: &[Observation],
        span_hours: f64,
        now: DateTime<Utc>,
    ) -> TrendReport {
        let span_ms = if span_hours.is_finite() && span_hours > 0.0 {
            span_hours * 3_600_000.0
        } else {
            0.0
        };
        let period_ms = if self.buckets > 0 {
            span_ms / self.buckets as f64
        } else {
            0.0
        };

        let mut time_periods = Vec::with_capacity(self.buckets);
        let mut mood_percentages = Vec::with_capacity(self.buckets);

        for i in 0..self.buckets {
            let period_end = millis_before(now, i as f64 * period_ms);
            let period_start = millis_before(now, (i + 1) as f64 * period_ms);

            let in_period: Vec<&Observation> = observations
                .iter()
                .filter(|obs| period_start <= obs.timestamp && obs.timestamp <= period_end)
                .collect();

            let pct = if in_period.is_empty() {
                0
            } else {
                mood_percentage(in_period.iter().copied())
            };

            time_periods.push(format!(
                "{} - {}",
                period_start.format("%H:%M"),
                period_end.format("%H:%M")
            ));
            mood_percentages.push(pct);
        }

        let mut emoji_counts = BTreeMap::new();
        for obs in observations {
            *emoji_counts.entry(obs.emoji.clone()).or_insert(0) += 1;
        }

        let trend_direction = TrendDirection::from_percentages(&mood_percentages);

        TrendReport {
            time_periods,
            mood_percentages,
            emoji_counts,
            trend_direction,
        }
    }
}

/// `now` shifted back by `ms`, clamped to the representable range
pub(crate) fn millis_before(now: DateTime<Utc>, ms: f64) -> DateTime<Utc> {
    let clamped = if ms >= 0.0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    };

    Duration::try_milliseconds(ms as i64)
        .and_then(|delta| now.checked_sub_signed(delta))
        .unwrap_or(clamped)
}
