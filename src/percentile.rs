use serde::Serialize;

use crate::metrics::MetricDef;
use crate::model::Player;

/// Qualitative band for a percentile bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorBand {
    High,
    MediumHigh,
    MediumLow,
    Low,
}

impl ColorBand {
    pub fn label(self) -> &'static str {
        match self {
            ColorBand::High => "high",
            ColorBand::MediumHigh => "medium-high",
            ColorBand::MediumLow => "medium-low",
            ColorBand::Low => "low",
        }
    }
}

pub fn ordinal_suffix(n: u64) -> &'static str {
    let j = n % 10;
    let k = n % 100;
    if j == 1 && k != 11 {
        "st"
    } else if j == 2 && k != 12 {
        "nd"
    } else if j == 3 && k != 13 {
        "rd"
    } else {
        "th"
    }
}

/// Round half away from zero. Negative and non-finite input reads as 0.
pub fn round_percentile(value: f64) -> u64 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.round() as u64
}

pub fn color_band(percentile: f64) -> ColorBand {
    if percentile >= 75.0 {
        ColorBand::High
    } else if percentile >= 50.0 {
        ColorBand::MediumHigh
    } else if percentile >= 25.0 {
        ColorBand::MediumLow
    } else {
        ColorBand::Low
    }
}

/// "80th", "21st", ...
pub fn format_ordinal(value: f64) -> String {
    let n = round_percentile(value);
    format!("{n}{}", ordinal_suffix(n))
}

pub fn format_percentile_label(value: f64) -> String {
    format!("{} percentile", format_ordinal(value))
}

/// Raw metric value as the dataset wrote it, followed by its unit.
pub fn format_raw_value(raw: f64, unit: &str) -> String {
    format!("{raw}{unit}")
}

/// `"{raw}{unit} ({ordinal} percentile)"`, shared by the detail panel and the comparison chart.
pub fn format_metric_text(raw: f64, unit: &str, percentile: f64) -> String {
    format!(
        "{} ({})",
        format_raw_value(raw, unit),
        format_percentile_label(percentile)
    )
}

/// One bar of the detail panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentileRow {
    pub id: &'static str,
    pub name: &'static str,
    pub position_relative: bool,
    pub present: bool,
    pub percentile: f64,
    pub band: ColorBand,
    pub text: String,
}

/// Detail panel rows in schema order. Metrics the player lacks render as an
/// empty bar at the 0th percentile.
pub fn percentile_rows(player: &Player, schema: &[MetricDef]) -> Vec<PercentileRow> {
    schema
        .iter()
        .map(|def| {
            let metric = player.metric(def.id);
            let (raw, unit, percentile) = match metric {
                Some(m) => (m.raw_value, m.display_unit.as_str(), m.percentile),
                None => (0.0, "", 0.0),
            };
            PercentileRow {
                id: def.id,
                name: def.name,
                position_relative: def.position_relative,
                present: metric.is_some(),
                percentile,
                band: color_band(percentile),
                text: format_metric_text(raw, unit, percentile),
            }
        })
        .collect()
}
