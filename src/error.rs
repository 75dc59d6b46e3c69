use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Which side of a comparison a player was requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn slot_label(self) -> &'static str {
        match self {
            Side::Left => "player 1",
            Side::Right => "player 2",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slot_label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Player not found: {name} ({side})")]
    NotFound { side: Side, name: String },
}

/// Why a metric entry was dropped while decoding the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedMetric {
    #[error("percentile missing or not numeric")]
    MissingPercentile,
    #[error("percentile is not a finite number")]
    NonFinitePercentile,
    #[error("raw value missing or not numeric")]
    MissingRawValue,
}
