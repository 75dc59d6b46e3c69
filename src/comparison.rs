use serde::Serialize;
use tracing::debug;

use crate::error::{CoreError, Side};
use crate::metrics::MetricDef;
use crate::model::{Dataset, MetricValue, Player};
use crate::percentile::format_metric_text;

/// Bars shorter than this carry their label outside the bar.
pub const TEXT_INSIDE_MIN_PERCENTILE: f64 = 30.0;
pub const EXPORT_WIDTH_PX: u32 = 1200;
pub const EXPORT_HEIGHT_PX: u32 = 800;
pub const AXIS_CAPTION: &str = "Percentile";

const HEADER_ANCHOR_X: f64 = 10.0;
const WRAP_NAME_OVER_CHARS: usize = 15;
const TICKS: [i32; 9] = [-100, -75, -50, -25, 0, 25, 50, 75, 100];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BarColor {
    Highlighted,
    Neutral,
}

impl BarColor {
    pub fn hex(self) -> &'static str {
        match self {
            BarColor::Highlighted => "#0d6efd",
            BarColor::Neutral => "#ced4da",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextPosition {
    Inside,
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextColor {
    Dark,
    Light,
}

impl TextColor {
    pub fn css(self) -> &'static str {
        match self {
            TextColor::Dark => "black",
            TextColor::Light => "white",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    /// Signed: negative bars extend left of the zero baseline.
    pub magnitude: f64,
    pub percentile: f64,
    pub text: String,
    pub text_position: TextPosition,
    pub text_color: TextColor,
    pub bar_color: BarColor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
    pub metric_id: &'static str,
    pub metric: &'static str,
    pub left: ChartBar,
    pub right: ChartBar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerHeader {
    pub name: String,
    pub name_lines: Vec<String>,
    pub iq_score: f64,
    pub iq_text: String,
    pub anchor_x: f64,
    pub align: Align,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTick {
    pub value: i32,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueAxis {
    pub caption: &'static str,
    pub range: [f64; 2],
    pub ticks: Vec<AxisTick>,
}

/// Declarative description of a two-player diverging bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub left: PlayerHeader,
    pub right: PlayerHeader,
    /// Schema order, which is also top-to-bottom display order.
    pub rows: Vec<ChartRow>,
    /// Category axis listed bottom to top (reverse of `rows`).
    pub category_axis: Vec<&'static str>,
    pub value_axis: ValueAxis,
    pub export_stem: String,
    pub export_size: (u32, u32),
}

/// One player's side of the chart, borrowed from a `ChartSpec`.
#[derive(Debug, Clone)]
pub struct ChartSeries<'a> {
    pub player: &'a str,
    pub metrics: Vec<&'static str>,
    pub bars: Vec<&'a ChartBar>,
}

impl ChartSpec {
    pub fn left_series(&self) -> ChartSeries<'_> {
        ChartSeries {
            player: &self.left.name,
            metrics: self.rows.iter().map(|r| r.metric).collect(),
            bars: self.rows.iter().map(|r| &r.left).collect(),
        }
    }

    pub fn right_series(&self) -> ChartSeries<'_> {
        ChartSeries {
            player: &self.right.name,
            metrics: self.rows.iter().map(|r| r.metric).collect(),
            bars: self.rows.iter().map(|r| &r.right).collect(),
        }
    }

    pub fn row(&self, metric_id: &str) -> Option<&ChartRow> {
        self.rows.iter().find(|r| r.metric_id == metric_id)
    }
}

/// Resolve both names against the dataset and build the chart.
/// The left name is checked first; no chart is produced if either misses.
pub fn build_comparison(
    dataset: &Dataset,
    left: &str,
    right: &str,
    schema: &[MetricDef],
) -> Result<ChartSpec, CoreError> {
    let Some(a) = dataset.find(left) else {
        return Err(CoreError::NotFound {
            side: Side::Left,
            name: left.to_string(),
        });
    };
    let Some(b) = dataset.find(right) else {
        return Err(CoreError::NotFound {
            side: Side::Right,
            name: right.to_string(),
        });
    };
    Ok(build_comparison_for(a, b, schema))
}

pub fn build_comparison_for(a: &Player, b: &Player, schema: &[MetricDef]) -> ChartSpec {
    let mut rows = Vec::with_capacity(schema.len());
    for def in schema {
        let (Some(ma), Some(mb)) = (a.metric(def.id), b.metric(def.id)) else {
            continue;
        };
        let (color_a, color_b) = bar_colors(ma.percentile, mb.percentile);
        rows.push(ChartRow {
            metric_id: def.id,
            metric: def.name,
            left: chart_bar(ma, -ma.percentile, color_a),
            right: chart_bar(mb, mb.percentile, color_b),
        });
    }
    debug!(
        left = %a.name,
        right = %b.name,
        rows = rows.len(),
        skipped = schema.len() - rows.len(),
        "built comparison chart"
    );

    let category_axis = rows.iter().rev().map(|r| r.metric).collect();
    ChartSpec {
        title: format!("nba-iq\n{} vs {}", a.name, b.name),
        left: player_header(a, -HEADER_ANCHOR_X, Align::Right),
        right: player_header(b, HEADER_ANCHOR_X, Align::Left),
        rows,
        category_axis,
        value_axis: value_axis(),
        export_stem: export_file_stem(&a.name, &b.name),
        export_size: (EXPORT_WIDTH_PX, EXPORT_HEIGHT_PX),
    }
}

/// Exact comparison; equal percentiles leave both bars neutral.
fn bar_colors(a: f64, b: f64) -> (BarColor, BarColor) {
    if a > b {
        (BarColor::Highlighted, BarColor::Neutral)
    } else if b > a {
        (BarColor::Neutral, BarColor::Highlighted)
    } else {
        (BarColor::Neutral, BarColor::Neutral)
    }
}

fn chart_bar(metric: &MetricValue, magnitude: f64, bar_color: BarColor) -> ChartBar {
    let (text_position, text_color) = if metric.percentile < TEXT_INSIDE_MIN_PERCENTILE {
        (TextPosition::Outside, TextColor::Dark)
    } else {
        (TextPosition::Inside, TextColor::Light)
    };
    ChartBar {
        magnitude,
        percentile: metric.percentile,
        text: format_metric_text(metric.raw_value, &metric.display_unit, metric.percentile),
        text_position,
        text_color,
        bar_color,
    }
}

fn player_header(player: &Player, anchor_x: f64, align: Align) -> PlayerHeader {
    PlayerHeader {
        name: player.name.clone(),
        name_lines: wrap_player_name(&player.name),
        iq_score: player.iq_score,
        iq_text: format!("bbIQ: {}", player.iq_score),
        anchor_x,
        align,
    }
}

fn value_axis() -> ValueAxis {
    ValueAxis {
        caption: AXIS_CAPTION,
        range: [-100.0, 100.0],
        ticks: TICKS
            .iter()
            .map(|&value| AxisTick {
                value,
                label: format!("{}%", value.abs()),
            })
            .collect(),
    }
}

/// Long multi-word names break into two lines, the first holding the larger half of the words.
pub fn wrap_player_name(name: &str) -> Vec<String> {
    if name.chars().count() > WRAP_NAME_OVER_CHARS {
        let words: Vec<&str> = name.split(' ').collect();
        if words.len() > 1 {
            let midpoint = words.len().div_ceil(2);
            return vec![words[..midpoint].join(" "), words[midpoint..].join(" ")];
        }
    }
    vec![name.to_string()]
}

/// File name (without extension) used when exporting a comparison.
pub fn export_file_stem(left: &str, right: &str) -> String {
    format!("nba-iq {left} vs {right}")
}

/// Entry of the player picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerOption {
    pub name: String,
    pub label: String,
}

pub fn player_options(dataset: &Dataset) -> Vec<PlayerOption> {
    let mut options: Vec<PlayerOption> = dataset
        .players()
        .iter()
        .map(|p| PlayerOption {
            name: p.name.clone(),
            label: format!("{} ({})", p.name, p.position),
        })
        .collect();
    options.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
    options
}
