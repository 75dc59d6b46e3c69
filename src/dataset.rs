use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::MalformedMetric;
use crate::model::{Dataset, MetricValue, Player, TeamDirectory, value_to_f64};

#[derive(Debug, Deserialize)]
struct PlayerRecord {
    name: Option<String>,
    rank: Option<Value>,
    team: Option<Value>,
    position: Option<String>,
    iq_score: Option<Value>,
    minutes: Option<Value>,
    games: Option<Value>,
    metrics: Option<HashMap<String, Value>>,
}

pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed reading players from {}", path.display()))?;
    let players = parse_players_json(&raw)
        .with_context(|| format!("failed parsing players from {}", path.display()))?;
    info!(path = %path.display(), players = players.len(), "loaded dataset");
    Ok(Dataset::new(players))
}

pub fn load_teams(path: &Path) -> Result<TeamDirectory> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed reading teams from {}", path.display()))?;
    let teams = parse_teams_json(&raw)
        .with_context(|| format!("failed parsing teams from {}", path.display()))?;
    info!(path = %path.display(), teams = teams.len(), "loaded teams");
    Ok(teams)
}

/// Decode the player snapshot. `null` and `[]` yield an empty list; records
/// without a name or rank are skipped, as are malformed metric entries.
pub fn parse_players_json(raw: &str) -> Result<Vec<Player>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let records: Vec<PlayerRecord> = serde_json::from_str(trimmed).context("invalid players json")?;
    let mut players = Vec::with_capacity(records.len());
    for (idx, record) in records.into_iter().enumerate() {
        match player_from_record(record) {
            Some(player) => players.push(player),
            None => warn!(index = idx, "skipping player record without name or rank"),
        }
    }
    Ok(players)
}

/// Decode `{ "<team id>": "<team name>" }`. Keys that are not ids are ignored.
pub fn parse_teams_json(raw: &str) -> Result<TeamDirectory> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(TeamDirectory::default());
    }
    let map: HashMap<String, String> = serde_json::from_str(trimmed).context("invalid teams json")?;
    let names = map
        .into_iter()
        .filter_map(|(id, name)| id.trim().parse::<u32>().ok().map(|id| (id, name)))
        .collect();
    Ok(TeamDirectory::new(names))
}

fn player_from_record(record: PlayerRecord) -> Option<Player> {
    let name = record.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())?;
    let rank = record.rank.as_ref().and_then(value_to_f64).filter(|r| *r >= 1.0)? as u32;

    let mut metrics = BTreeMap::new();
    for (id, entry) in record.metrics.unwrap_or_default() {
        match decode_metric(&entry) {
            Ok(value) => {
                metrics.insert(id, value);
            }
            Err(reason) => debug!(player = %name, metric = %id, %reason, "dropping metric"),
        }
    }

    Some(Player {
        position: record
            .position
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| "Unknown".to_string()),
        team: non_negative(record.team.as_ref()) as u32,
        rank,
        minutes: non_negative(record.minutes.as_ref()),
        games: non_negative(record.games.as_ref()) as u32,
        iq_score: record
            .iq_score
            .as_ref()
            .and_then(value_to_f64)
            .filter(|v| v.is_finite())
            .unwrap_or(0.0),
        name,
        metrics,
    })
}

fn decode_metric(entry: &Value) -> Result<MetricValue, MalformedMetric> {
    let Value::Object(fields) = entry else {
        return Err(MalformedMetric::MissingPercentile);
    };
    MetricValue::decode(
        fields.get("raw_value"),
        fields.get("display_unit"),
        fields.get("percentile"),
    )
}

fn non_negative(value: Option<&Value>) -> f64 {
    value
        .and_then(value_to_f64)
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_and_empty_are_empty() {
        assert!(parse_players_json("null").unwrap().is_empty());
        assert!(parse_players_json("[]").unwrap().is_empty());
        assert!(parse_teams_json("").unwrap().is_empty());
    }

    #[test]
    fn player_defaults_are_defensive() {
        let raw = r#"[{"name":"X","rank":3,"minutes":"abc","games":-2,"metrics":null}]"#;
        let players = parse_players_json(raw).unwrap();
        assert_eq!(players.len(), 1);
        let p = &players[0];
        assert_eq!(p.rank, 3);
        assert_eq!(p.minutes, 0.0);
        assert_eq!(p.games, 0);
        assert_eq!(p.position, "Unknown");
        assert!(p.metrics.is_empty());
    }

    #[test]
    fn records_without_rank_are_skipped() {
        let raw = r#"[{"name":"NoRank"},{"name":"","rank":1},{"name":"Ok","rank":2}]"#;
        let players = parse_players_json(raw).unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name, "Ok");
    }

    #[test]
    fn null_metric_entries_are_dropped() {
        let raw = r#"[{"name":"X","rank":1,"metrics":{
            "age":null,
            "ast_pct":{"raw_value":31.2,"display_unit":"%","percentile":88},
            "efg_pct":{"raw_value":0.55,"percentile":null}
        }}]"#;
        let players = parse_players_json(raw).unwrap();
        let p = &players[0];
        assert_eq!(p.metrics.len(), 1);
        assert_eq!(p.metric("ast_pct").map(|m| m.display_unit.as_str()), Some("%"));
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(parse_players_json("{not json").is_err());
    }
}
