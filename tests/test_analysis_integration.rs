//! Integration tests for the analysis flows over loaded snapshots
//!
//! Covers the full path from a JSONL snapshot on disk through filtering into
//! events, area mood and trends, plus the invariants every flow must hold
//! for degenerate inputs.

#[cfg(test)]
mod analysis_integration_tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use moodflow::analysis_core::{haversine_km, load_snapshot};
    use moodflow::{
        AnalyzerConfig, AreaMood, EventType, GeoPoint, MoodAnalyzer, Observation,
        ObservationFilter, TrendDirection,
    };
    use std::io::Write;

    const CENTER_LAT: f64 = 55.7558;
    const CENTER_LON: f64 = 37.6173;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 18, 0, 0).unwrap()
    }

    fn create_test_observation(
        id: u64,
        emoji: &str,
        text: &str,
        lat_offset: f64,
        minutes_ago: i64,
    ) -> Observation {
        Observation {
            id,
            emoji: emoji.to_string(),
            text: text.to_string(),
            latitude: CENTER_LAT + lat_offset,
            longitude: CENTER_LON,
            timestamp: now() - Duration::minutes(minutes_ago),
            user_id: id % 3,
        }
    }

    /// Five observations within ~180m and 8 minutes of each other
    fn tight_group(start_id: u64, emoji: &str, text: &str) -> Vec<Observation> {
        (0..5)
            .map(|i| create_test_observation(start_id + i, emoji, text, i as f64 * 0.0004, i as i64 * 2))
            .collect()
    }

    #[test]
    fn test_positive_group_without_text_yields_no_event() {
        let analyzer = MoodAnalyzer::default();
        let obs = tight_group(1, "😊", "");

        let clusters = analyzer.clusters(&obs);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].mood_percentage, 100);

        assert!(analyzer.detect_events(&obs).is_empty());
    }

    #[test]
    fn test_concert_group_yields_concert_event() {
        let analyzer = MoodAnalyzer::default();
        let obs = tight_group(1, "🥰", "Вот это концерт");

        let events = analyzer.detect_events(&obs);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, EventType::Concert);
        assert_eq!(events[0].confidence, 40);
        assert_eq!(events[0].keywords, vec!["концерт"]);
        assert_eq!(events[0].moods_count, 5);
    }

    #[test]
    fn test_area_with_no_nearby_observations() {
        let analyzer = MoodAnalyzer::default();
        // All ~55km north of the query point
        let obs = tight_group(1, "😡", "");
        let far_center = GeoPoint::new(CENTER_LAT - 0.5, CENTER_LON);

        let mood = analyzer.area_mood(&obs, far_center, Some(5.0));
        assert_eq!(mood, AreaMood::neutral());
        assert_eq!(mood.dominant_emoji, "😐");
        assert_eq!(mood.mood_percentage, 50);
        assert_eq!(mood.moods_count, 0);
    }

    #[test]
    fn test_cluster_members_respect_seed_bounds() {
        let config = AnalyzerConfig::default();
        let analyzer = MoodAnalyzer::new(config.clone());

        // A mixed field: a dense core, a sparse ring and stale outliers
        let mut obs = Vec::new();
        let mut id = 0;
        for ring in 0..6 {
            for step in 0..6 {
                id += 1;
                let emoji = ["😊", "😢", "😐", "🦄"][(id % 4) as usize];
                obs.push(create_test_observation(
                    id,
                    emoji,
                    "",
                    ring as f64 * 0.003,
                    step * 50 + ring * 7,
                ));
            }
        }

        let clusters = analyzer.clusters(&obs);
        assert!(!clusters.is_empty());

        for cluster in &clusters {
            assert!(cluster.len() >= config.min_cluster_size);
            assert!(cluster.mood_percentage <= 100);

            let seed = &cluster.members[0];
            for member in &cluster.members {
                let d = haversine_km(seed.latitude, seed.longitude, member.latitude, member.longitude);
                assert!(d <= config.cluster_radius_km, "member {} is {}km from seed", member.id, d);
                let dt = (seed.timestamp - member.timestamp).num_minutes().abs();
                assert!(dt <= 240, "member {} is {}min from seed", member.id, dt);
            }
        }

        // No observation lands in two clusters
        let mut seen: Vec<u64> = clusters.iter().flat_map(|c| c.members.iter().map(|m| m.id)).collect();
        let total = seen.len();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), total);
    }

    #[test]
    fn test_events_never_below_floor() {
        let analyzer = MoodAnalyzer::default();
        let mut obs = tight_group(1, "😊", "дождь");
        // A second group ~11km away with richer text
        obs.extend(
            tight_group(100, "😢", "пробка, авария, машина")
                .into_iter()
                .map(|mut o| {
                    o.latitude += 0.1;
                    o
                }),
        );

        let events = analyzer.detect_events(&obs);

        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.confidence >= 30 && e.confidence <= 100));
        assert!(events.iter().any(|e| e.event_type == EventType::Traffic && e.confidence == 80));
        assert!(events.iter().any(|e| e.event_type == EventType::Weather && e.confidence == 37));

        assert_eq!(analyzer.detect_events_with_floor(&obs, 50).len(), 1);
    }

    #[test]
    fn test_empty_snapshot_defaults() {
        let analyzer = MoodAnalyzer::default();

        assert!(analyzer.clusters(&[]).is_empty());
        assert!(analyzer.detect_events(&[]).is_empty());

        let trends = analyzer.trends(&[], None, now());
        assert_eq!(trends.time_periods.len(), 6);
        assert_eq!(trends.mood_percentages, vec![0; 6]);
        assert_eq!(trends.trend_direction, TrendDirection::Stable);
    }

    #[test]
    fn test_single_observation() {
        let analyzer = MoodAnalyzer::default();
        let obs = vec![create_test_observation(1, "😢", "концерт", 0.0, 5)];

        assert!(analyzer.detect_events(&obs).is_empty());

        let mood = analyzer.area_mood(&obs, GeoPoint::new(CENTER_LAT, CENTER_LON), None);
        assert_eq!(mood.mood_percentage, 0);
        assert_eq!(mood.moods_count, 1);

        let trends = analyzer.trends(&obs, Some(24.0), now());
        assert_eq!(trends.mood_percentages[0], 0);
        assert_eq!(trends.trend_direction, TrendDirection::Stable);
    }

    #[test]
    fn test_reruns_are_identical() {
        let analyzer = MoodAnalyzer::default();
        let mut obs = tight_group(1, "😊", "матч");
        obs.extend(tight_group(10, "😐", "обед"));
        let center = GeoPoint::new(CENTER_LAT, CENTER_LON);

        assert_eq!(analyzer.detect_events(&obs), analyzer.detect_events(&obs));
        assert_eq!(
            analyzer.area_mood(&obs, center, None),
            analyzer.area_mood(&obs, center, None)
        );
        assert_eq!(
            analyzer.trends(&obs, None, now()),
            analyzer.trends(&obs, None, now())
        );
    }

    #[test]
    fn test_snapshot_to_events_end_to_end() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("moods.jsonl");

        let mut file = std::fs::File::create(&file_path).unwrap();
        for obs in tight_group(1, "😎", "футбольный матч, наша команда") {
            writeln!(file, "{}", serde_json::to_string(&obs).unwrap()).unwrap();
        }
        // An old record the time filter should drop
        let stale = create_test_observation(50, "😢", "матч", 0.0, 60 * 30);
        writeln!(file, "{}", serde_json::to_string(&stale).unwrap()).unwrap();
        writeln!(file, "not json at all").unwrap();
        drop(file);

        let snapshot = load_snapshot(&file_path).unwrap();
        assert_eq!(snapshot.observations.len(), 6);
        assert_eq!(snapshot.rejected, 1);

        let observations = ObservationFilter::new()
            .within_hours(24.0, now())
            .within_radius(GeoPoint::new(CENTER_LAT, CENTER_LON), 3.0)
            .apply(&snapshot.observations);
        assert_eq!(observations.len(), 5);

        let events = MoodAnalyzer::default().detect_events(&observations);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, EventType::Sports);
        assert_eq!(events[0].keywords, vec!["матч", "команда"]);
        // round(2/6*100) + 20 = 53
        assert_eq!(events[0].confidence, 53);
        assert_eq!(events[0].dominant_emoji, "😎");

        let json = serde_json::to_value(&events).unwrap();
        assert_eq!(json[0]["type"], "sports");
    }
}
