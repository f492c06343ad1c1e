//! Observation normalization from JSONL records to the validated Observation struct

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::geo::GeoPoint;

/// A single mood observation: emoji, optional text, coordinate and instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ObservationRecord")]
pub struct Observation {
    pub id: u64,
    pub emoji: String,
    pub text: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
    pub user_id: u64,
}

/// Wire shape of an observation before validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub id: u64,
    pub emoji: String,
    #[serde(default)]
    pub text: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: String,
    pub user_id: u64,
}

#[derive(Debug)]
pub enum ObservationError {
    Io(std::io::Error),
    Json(serde_json::Error),
    InvalidTimestamp(String),
    InvalidCoordinates { latitude: f64, longitude: f64 },
}

impl From<std::io::Error> for ObservationError {
    fn from(err: std::io::Error) -> Self {
        ObservationError::Io(err)
    }
}

impl From<serde_json::Error> for ObservationError {
    fn from(err: serde_json::Error) -> Self {
        ObservationError::Json(err)
    }
}

impl std::fmt::Display for ObservationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObservationError::Io(e) => write!(f, "IO error: {}", e),
            ObservationError::Json(e) => write!(f, "JSON error: {}", e),
            ObservationError::InvalidTimestamp(ts) => write!(f, "Invalid timestamp: {}", ts),
            ObservationError::InvalidCoordinates {
                latitude,
                longitude,
            } => write!(f, "Invalid coordinates: ({}, {})", latitude, longitude),
        }
    }
}

impl std::error::Error for ObservationError {}

impl TryFrom<ObservationRecord> for Observation {
    type Error = ObservationError;

    fn try_from(record: ObservationRecord) -> Result<Self, Self::Error> {
        let timestamp = parse_timestamp(&record.timestamp)?;

        let lat_ok = record.latitude.is_finite() && (-90.0..=90.0).contains(&record.latitude);
        let lon_ok = record.longitude.is_finite() && (-180.0..=180.0).contains(&record.longitude);
        if !lat_ok || !lon_ok {
            return Err(ObservationError::InvalidCoordinates {
                latitude: record.latitude,
                longitude: record.longitude,
            });
        }

        Ok(Observation {
            id: record.id,
            emoji: record.emoji,
            text: record.text.unwrap_or_default(),
            latitude: record.latitude,
            longitude: record.longitude,
            timestamp,
            user_id: record.user_id,
        })
    }
}

impl Observation {
    /// Parse and validate an Observation from a JSONL line
    pub fn from_jsonl(line: &str) -> Result<Self, ObservationError> {
        let record: ObservationRecord = serde_json::from_str(line)?;
        Observation::try_from(record)
    }

    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }
}

/// Parse RFC 3339, or naive ISO-8601 interpreted as UTC
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ObservationError> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }

    Err(ObservationError::InvalidTimestamp(raw.to_string()))
}
