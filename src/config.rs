use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "nba_iq_terminal";

pub const DEFAULT_PLAYERS_PATH: &str = "data/players_with_raw_data.json";
pub const DEFAULT_TEAMS_PATH: &str = "data/teams.json";
pub const DEFAULT_COMPARE_LEFT: &str = "LeBron James";
pub const DEFAULT_COMPARE_RIGHT: &str = "Nikola Jokić";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Runtime settings, read from the environment (after `.env.local` / `.env`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub players_path: PathBuf,
    pub teams_path: PathBuf,
    pub compare_left: String,
    pub compare_right: String,
    pub export_dir: PathBuf,
    pub log_filter: String,
    pub log_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            players_path: PathBuf::from(DEFAULT_PLAYERS_PATH),
            teams_path: PathBuf::from(DEFAULT_TEAMS_PATH),
            compare_left: DEFAULT_COMPARE_LEFT.to_string(),
            compare_right: DEFAULT_COMPARE_RIGHT.to_string(),
            export_dir: PathBuf::from("."),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_path: app_cache_dir().map(|dir| dir.join("nba_iq_terminal.log")),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, with an injectable lookup so callers (and tests)
    /// don't have to touch the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();
        Self {
            players_path: get("NBA_IQ_PLAYERS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.players_path),
            teams_path: get("NBA_IQ_TEAMS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.teams_path),
            compare_left: get("NBA_IQ_COMPARE_A").unwrap_or(defaults.compare_left),
            compare_right: get("NBA_IQ_COMPARE_B").unwrap_or(defaults.compare_right),
            export_dir: get("NBA_IQ_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.export_dir),
            log_filter: get("NBA_IQ_LOG").unwrap_or(defaults.log_filter),
            log_path: get("NBA_IQ_LOG_FILE")
                .map(PathBuf::from)
                .or(defaults.log_path),
        }
    }
}

pub fn app_cache_dir() -> Option<PathBuf> {
    // Prefer XDG cache.
    if let Ok(base) = env::var("XDG_CACHE_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(APP_DIR));
        }
    }
    let home = env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(home).join(".cache").join(APP_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn lookup_overrides_defaults() {
        let vars = HashMap::from([
            ("NBA_IQ_PLAYERS_PATH", "/tmp/players.json"),
            ("NBA_IQ_COMPARE_A", "Stephen Curry"),
            ("NBA_IQ_COMPARE_B", "  "),
        ]);
        let cfg = AppConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.players_path, PathBuf::from("/tmp/players.json"));
        assert_eq!(cfg.teams_path, PathBuf::from(DEFAULT_TEAMS_PATH));
        assert_eq!(cfg.compare_left, "Stephen Curry");
        assert_eq!(cfg.compare_right, DEFAULT_COMPARE_RIGHT);
        assert_eq!(cfg.log_filter, "info");
    }
}
