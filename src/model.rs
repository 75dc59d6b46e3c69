use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use serde_json::Value;

use crate::error::MalformedMetric;

/// One metric reading for one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricValue {
    pub raw_value: f64,
    pub display_unit: String,
    /// Always within `0.0..=100.0`.
    pub percentile: f64,
}

impl MetricValue {
    pub fn new(raw_value: f64, display_unit: impl Into<String>, percentile: f64) -> Self {
        Self {
            raw_value,
            display_unit: display_unit.into(),
            percentile: clamp_percentile(percentile),
        }
    }

    /// Decode the loose JSON fields of a metric entry.
    ///
    /// Numbers may arrive as JSON numbers or numeric strings. A finite
    /// percentile outside `0..=100` is clamped; anything else that is not a
    /// usable number rejects the whole entry.
    pub fn decode(
        raw_value: Option<&Value>,
        display_unit: Option<&Value>,
        percentile: Option<&Value>,
    ) -> Result<Self, MalformedMetric> {
        let percentile = percentile
            .and_then(value_to_f64)
            .ok_or(MalformedMetric::MissingPercentile)?;
        if !percentile.is_finite() {
            return Err(MalformedMetric::NonFinitePercentile);
        }
        let raw_value = raw_value
            .and_then(value_to_f64)
            .filter(|v| v.is_finite())
            .ok_or(MalformedMetric::MissingRawValue)?;
        let unit = match display_unit {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        Ok(Self::new(raw_value, unit, percentile))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub name: String,
    pub position: String,
    pub team: u32,
    pub rank: u32,
    pub minutes: f64,
    pub games: u32,
    pub iq_score: f64,
    pub metrics: BTreeMap<String, MetricValue>,
}

impl Player {
    pub fn metric(&self, id: &str) -> Option<&MetricValue> {
        self.metrics.get(id)
    }

    /// Case-insensitive exact name match.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// The loaded player snapshot, kept in ingestion order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    players: Vec<Player>,
}

impl Dataset {
    pub fn new(players: Vec<Player>) -> Self {
        Self { players }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// First player whose name matches case-insensitively.
    pub fn find(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name_matches(name))
    }
}

/// Team id to display name lookup used by the detail panel.
#[derive(Debug, Clone, Default)]
pub struct TeamDirectory {
    names: HashMap<u32, String>,
}

impl TeamDirectory {
    pub fn new(names: HashMap<u32, String>) -> Self {
        Self { names }
    }

    pub fn name(&self, team: u32) -> Option<&str> {
        self.names.get(&team).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

pub fn clamp_percentile(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// Lenient numeric read: JSON numbers, or strings that parse as a float.
pub fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
