//! Keyword-based event classification for clusters

use serde::Serialize;

use super::clusterer::Cluster;
use super::geo::GeoPoint;
use crate::config::AnalyzerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Concert,
    Sports,
    Traffic,
    Weather,
    Food,
    Party,
    Unknown,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Concert => "concert",
            EventType::Sports => "sports",
            EventType::Traffic => "traffic",
            EventType::Weather => "weather",
            EventType::Food => "food",
            EventType::Party => "party",
            EventType::Unknown => "unknown",
        }
    }
}

/// Keyword table in declaration order; earlier rows win ties
pub const EVENT_KEYWORDS: &[(EventType, &[&str])] = &[
    (
        EventType::Concert,
        &["концерт", "музыка", "группа", "шоу", "выступление"],
    ),
    (
        EventType::Sports,
        &["игра", "матч", "спорт", "команда", "победа", "проигрыш"],
    ),
    (
        EventType::Traffic,
        &["пробка", "затор", "авария", "дорога", "машина"],
    ),
    (
        EventType::Weather,
        &["дождь", "снег", "жара", "холод", "погода", "гроза"],
    ),
    (
        EventType::Food,
        &["ресторан", "еда", "покушать", "ужин", "обед"],
    ),
    (
        EventType::Party,
        &["вечеринка", "праздник", "день рождения", "юбилей"],
    ),
];

/// Confidence added on top of keyword coverage
const BASE_CONFIDENCE_BONUS: u64 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub event_type: EventType,
    pub keywords: Vec<String>,
    pub confidence: u8,
}

impl Classification {
    fn unknown() -> Self {
        Self {
            event_type: EventType::Unknown,
            keywords: Vec::new(),
            confidence: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub location: GeoPoint,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub confidence: u8,
    pub dominant_emoji: String,
    pub mood_percentage: u8,
    pub moods_count: usize,
    pub keywords: Vec<String>,
}

/// Maps clusters to events through a keyword table and a confidence floor
pub struct EventClassifier {
    min_confidence: u8,
    table: &'static [(EventType, &'static [&'static str])],
}

impl EventClassifier {
    pub fn new(min_confidence: u8, table: &'static [(EventType, &'static [&'static str])]) -> Self {
        Self {
            min_confidence,
            table,
        }
    }

    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self::new(config.min_confidence, EVENT_KEYWORDS)
    }

    pub fn with_defaults() -> Self {
        Self::from_config(&AnalyzerConfig::default())
    }

    pub fn min_confidence(&self) -> u8 {
        self.min_confidence
    }

    /// Classify lowercased search text
    ///
    /// Keywords match as plain substrings, so a keyword inside an unrelated
    /// word still counts.
    pub fn classify_text(&self, text: &str) -> Classification {
        if text.is_empty() {
            return Classification::unknown();
        }

        let mut best: Option<(EventType, Vec<&str>, usize)> = None;

        for (event_type, keywords) in self.table {
            let found: Vec<&str> = keywords
                .iter()
                .copied()
                .filter(|keyword| text.contains(keyword))
                .collect();

            let is_better = match &best {
                Some((_, best_found, _)) => found.len() > best_found.len(),
                None => !found.is_empty(),
            };
            if is_better {
                best = Some((*event_type, found, keywords.len()));
            }
        }

        let Some((event_type, found, total)) = best else {
            return Classification::unknown();
        };

        // round(found / total * 100) + bonus, capped at 100
        let total = total as u64;
        let coverage = (200 * found.len() as u64 + total) / (2 * total);
        let confidence = (coverage + BASE_CONFIDENCE_BONUS).min(100) as u8;

        Classification {
            event_type,
            keywords: found.into_iter().map(String::from).collect(),
            confidence,
        }
    }

    /// Classify a cluster from the text of its members
    pub fn classify(&self, cluster: &Cluster) -> Classification {
        let search_text = cluster
            .members
            .iter()
            .filter(|m| m.has_text())
            .map(|m| m.text.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");

        self.classify_text(&search_text)
    }

    /// Turn clusters into events, dropping those below the confidence floor
    pub fn detect_events(&self, clusters: &[Cluster]) -> Vec<Event> {
        self.detect_events_with_floor(clusters, self.min_confidence)
    }

    /// Like [`detect_events`](Self::detect_events) with a stricter floor
    ///
    /// A floor below the configured one is ignored.
    pub fn detect_events_with_floor(&self, clusters: &[Cluster], min_confidence: u8) -> Vec<Event> {
        let min_confidence = min_confidence.max(self.min_confidence);
        let mut events = Vec::new();

        for cluster in clusters {
            let classification = self.classify(cluster);

            if classification.confidence < min_confidence {
                log::debug!(
                    "Cluster at ({:.5}, {:.5}) dropped: {} confidence {}",
                    cluster.center.latitude,
                    cluster.center.longitude,
                    classification.event_type.as_str(),
                    classification.confidence
                );
                continue;
            }

            events.push(Event {
                location: cluster.center,
                event_type: classification.event_type,
                confidence: classification.confidence,
                dominant_emoji: cluster.dominant_emoji.clone(),
                mood_percentage: cluster.mood_percentage,
                moods_count: cluster.len(),
                keywords: classification.keywords,
            });
        }

        events
    }
}
