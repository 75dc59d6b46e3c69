use std::collections::BTreeMap;

use nba_iq_terminal::metrics::metric_schema;
use nba_iq_terminal::model::{MetricValue, Player};
use nba_iq_terminal::percentile::{
    ColorBand, color_band, format_percentile_label, ordinal_suffix, percentile_rows,
};

#[test]
fn ordinal_suffix_cases() {
    let cases = [
        (0, "th"),
        (1, "st"),
        (2, "nd"),
        (3, "rd"),
        (4, "th"),
        (11, "th"),
        (12, "th"),
        (13, "th"),
        (21, "st"),
        (22, "nd"),
        (23, "rd"),
        (100, "th"),
        (101, "st"),
        (111, "th"),
        (112, "th"),
        (113, "th"),
        (121, "st"),
    ];
    for (n, expected) in cases {
        assert_eq!(ordinal_suffix(n), expected, "n = {n}");
    }
}

#[test]
fn ordinal_suffix_matches_english_rules() {
    for n in 0..1000u64 {
        let expected = match (n % 10, n % 100) {
            (_, 11..=13) => "th",
            (1, _) => "st",
            (2, _) => "nd",
            (3, _) => "rd",
            _ => "th",
        };
        assert_eq!(ordinal_suffix(n), expected, "n = {n}");
    }
}

#[test]
fn color_band_boundaries() {
    assert_eq!(color_band(100.0), ColorBand::High);
    assert_eq!(color_band(75.0), ColorBand::High);
    assert_eq!(color_band(74.999), ColorBand::MediumHigh);
    assert_eq!(color_band(50.0), ColorBand::MediumHigh);
    assert_eq!(color_band(49.999), ColorBand::MediumLow);
    assert_eq!(color_band(25.0), ColorBand::MediumLow);
    assert_eq!(color_band(24.999), ColorBand::Low);
    assert_eq!(color_band(0.0), ColorBand::Low);
}

#[test]
fn percentile_label_rounds_half_up() {
    assert_eq!(format_percentile_label(80.0), "80th percentile");
    assert_eq!(format_percentile_label(20.5), "21st percentile");
    assert_eq!(format_percentile_label(12.4), "12th percentile");
    assert_eq!(format_percentile_label(0.0), "0th percentile");
    assert_eq!(format_percentile_label(100.0), "100th percentile");
}

#[test]
fn detail_rows_follow_schema_and_fill_gaps() {
    let player = Player {
        name: "Solo".to_string(),
        position: "PG".to_string(),
        team: 1,
        rank: 1,
        minutes: 30.0,
        games: 60,
        iq_score: 70.0,
        metrics: BTreeMap::from([(
            "efg_pct".to_string(),
            MetricValue::new(55.0, "%", 76.0),
        )]),
    };
    let rows = percentile_rows(&player, metric_schema());
    assert_eq!(rows.len(), metric_schema().len());
    for (row, def) in rows.iter().zip(metric_schema()) {
        assert_eq!(row.id, def.id);
    }

    let efg = rows.iter().find(|r| r.id == "efg_pct").unwrap();
    assert!(efg.present);
    assert_eq!(efg.band, ColorBand::High);
    assert_eq!(efg.text, "55% (76th percentile)");

    let age = rows.iter().find(|r| r.id == "age").unwrap();
    assert!(!age.present);
    assert_eq!(age.percentile, 0.0);
    assert_eq!(age.band, ColorBand::Low);
    assert_eq!(age.text, "0 (0th percentile)");
}
