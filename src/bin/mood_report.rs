//! Mood Report Binary - One Analysis Flow over a Snapshot
//!
//! Loads a JSONL snapshot of observations, narrows it the way the serving
//! layer does for each query, runs one flow and prints pretty JSON to stdout.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin mood_report -- events --lat 55.75 --lng 37.61 --radius 3
//! cargo run --release --bin mood_report -- area --lat 55.75 --lng 37.61
//! cargo run --release --bin mood_report -- trends --hours 12
//! ```
//!
//! ## Arguments
//!
//! - `--input PATH` - Snapshot file (overrides MOODFLOW_SNAPSHOT_PATH)
//! - `--lat`, `--lng`, `--radius` - Area of interest
//! - `--hours` - Time filter for events/area, trend span for trends
//! - `--emojis a,b` - Emoji filter (events only)
//! - `--min-confidence N` - Event confidence floor
//!
//! ## Environment Variables
//!
//! - MOODFLOW_SNAPSHOT_PATH - Snapshot path (default: data/moods.jsonl)
//! - MOODFLOW_* - Analyzer tunables, see `AnalyzerConfig::from_env`
//! - RUST_LOG - Logging level (optional, default: info)

use chrono::Utc;
use moodflow::analysis_core::{load_snapshot, TrendReport};
use moodflow::{AnalyzerConfig, GeoPoint, MoodAnalyzer, ObservationFilter};
use serde::Serialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Flow {
    Events,
    Area,
    Trends,
}

impl Flow {
    fn from_str(s: &str) -> Option<Self> {
        match s {
            "events" => Some(Flow::Events),
            "area" => Some(Flow::Area),
            "trends" => Some(Flow::Trends),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct ReportArgs {
    flow: Flow,
    input: PathBuf,
    lat: Option<f64>,
    lng: Option<f64>,
    radius: Option<f64>,
    hours: Option<f64>,
    emojis: Vec<String>,
    min_confidence: Option<u8>,
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|x| x == flag)
        .and_then(|idx| args.get(idx + 1))
        .cloned()
}

fn parsed_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Result<Option<T>, String> {
    match flag_value(args, flag) {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| format!("Invalid value for {}: {}", flag, raw)),
        None => Ok(None),
    }
}

impl ReportArgs {
    fn from_args(args: &[String]) -> Result<Self, String> {
        let flow = args
            .get(1)
            .and_then(|s| Flow::from_str(s))
            .ok_or_else(|| "Usage: mood_report <events|area|trends> [options]".to_string())?;

        let input = flag_value(args, "--input")
            .or_else(|| env::var("MOODFLOW_SNAPSHOT_PATH").ok())
            .unwrap_or_else(|| "data/moods.jsonl".to_string())
            .into();

        let emojis = flag_value(args, "--emojis")
            .map(|s| {
                s.split(',')
                    .map(|e| e.trim().to_string())
                    .filter(|e| !e.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            flow,
            input,
            lat: parsed_flag(args, "--lat")?,
            lng: parsed_flag(args, "--lng")?,
            radius: parsed_flag(args, "--radius")?,
            hours: parsed_flag(args, "--hours")?,
            emojis,
            min_confidence: parsed_flag(args, "--min-confidence")?,
        })
    }

    fn center(&self) -> Option<GeoPoint> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            _ => None,
        }
    }
}

/// Trend report with the snapshot size attached
#[derive(Serialize)]
struct TrendResponse {
    #[serde(flatten)]
    report: TrendReport,
    total_moods: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    dotenv::dotenv().ok();

    let args: Vec<String> = env::args().collect();
    let args = ReportArgs::from_args(&args)?;
    let config = AnalyzerConfig::from_env();

    log::info!("📊 Mood report: {:?}", args.flow);
    log::info!("   Snapshot: {}", args.input.display());
    log::info!("   Cluster radius: {}km", config.cluster_radius_km);
    log::info!("   Time window: {}h", config.cluster_time_window_hours);
    log::info!("   Min cluster size: {}", config.min_cluster_size);

    let snapshot = load_snapshot(&args.input)?;
    if snapshot.rejected > 0 {
        log::warn!("{} records rejected during load", snapshot.rejected);
    }

    let now = Utc::now();
    let analyzer = MoodAnalyzer::new(config);

    let output = match args.flow {
        Flow::Events => {
            let mut filter = ObservationFilter::new()
                .within_hours(args.hours.unwrap_or(24.0), now)
                .with_emojis(args.emojis.clone());
            if let (Some(center), Some(radius)) = (args.center(), args.radius) {
                filter = filter.within_radius(center, radius);
            }
            let observations = filter.apply(&snapshot.observations);

            let events = match args.min_confidence {
                Some(floor) => analyzer.detect_events_with_floor(&observations, floor),
                None => analyzer.detect_events(&observations),
            };
            log::info!("✅ {} events from {} observations", events.len(), observations.len());
            serde_json::to_string_pretty(&events)?
        }
        Flow::Area => {
            let center = args
                .center()
                .ok_or("area report requires --lat and --lng")?;
            let mut filter = ObservationFilter::new();
            if let Some(hours) = args.hours {
                filter = filter.within_hours(hours, now);
            }
            let observations = filter.apply(&snapshot.observations);

            let area_mood = analyzer.area_mood(&observations, center, args.radius);
            serde_json::to_string_pretty(&area_mood)?
        }
        Flow::Trends => {
            let mut filter = ObservationFilter::new();
            if let (Some(center), Some(radius)) = (args.center(), args.radius) {
                filter = filter.within_radius(center, radius);
            }
            let observations = filter.apply(&snapshot.observations);

            let report = analyzer.trends(&observations, args.hours, now);
            log::info!("✅ Trend direction: {}", report.trend_direction.as_str());
            serde_json::to_string_pretty(&TrendResponse {
                report,
                total_moods: observations.len(),
            })?
        }
    };

    println!("{}", output);
    Ok(())
}
