use crate::model::Player;

/// Minimum minutes-per-game and games-played a player needs to be listed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Thresholds {
    pub min_minutes: f64,
    pub min_games: f64,
}

impl Thresholds {
    pub fn new(min_minutes: f64, min_games: f64) -> Self {
        Self {
            min_minutes: clamp_threshold(min_minutes),
            min_games: clamp_threshold(min_games),
        }
    }

    /// Build from the raw text of the two filter inputs.
    pub fn from_inputs(minutes: &str, games: &str) -> Self {
        Self {
            min_minutes: normalize_threshold(minutes),
            min_games: normalize_threshold(games),
        }
    }

    pub fn admits(&self, player: &Player) -> bool {
        player.minutes >= self.min_minutes && f64::from(player.games) >= self.min_games
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Filter-input normalization: empty, non-numeric, negative or non-finite
/// text all mean "no threshold".
pub fn normalize_threshold(input: &str) -> f64 {
    let s = input.trim();
    if s.is_empty() {
        return 0.0;
    }
    s.parse::<f64>().map(clamp_threshold).unwrap_or(0.0)
}

fn clamp_threshold(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Players passing both thresholds, ordered by their dataset rank.
///
/// The sort is stable, so equal ranks keep their input order; descending is
/// the exact reverse of the ascending sequence.
pub fn ranked_view<'a>(
    players: &'a [Player],
    thresholds: Thresholds,
    direction: SortDirection,
) -> Vec<&'a Player> {
    let mut rows: Vec<&Player> = players.iter().filter(|p| thresholds.admits(p)).collect();
    rows.sort_by_key(|p| p.rank);
    if direction == SortDirection::Descending {
        rows.reverse();
    }
    rows
}

pub fn filter_summary(count: usize) -> String {
    format!("showing {count} players")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_is_forgiving() {
        assert_eq!(normalize_threshold(""), 0.0);
        assert_eq!(normalize_threshold("   "), 0.0);
        assert_eq!(normalize_threshold("abc"), 0.0);
        assert_eq!(normalize_threshold("-5"), 0.0);
        assert_eq!(normalize_threshold("inf"), 0.0);
        assert_eq!(normalize_threshold(" 15 "), 15.0);
        assert_eq!(normalize_threshold("22.5"), 22.5);
    }

    #[test]
    fn sort_direction_toggles() {
        assert_eq!(SortDirection::default().toggle(), SortDirection::Descending);
        assert_eq!(SortDirection::Descending.toggle(), SortDirection::Ascending);
        assert_eq!(SortDirection::Ascending.arrow(), "▲");
    }

    #[test]
    fn thresholds_new_clamps() {
        let t = Thresholds::new(-3.0, f64::NAN);
        assert_eq!(t, Thresholds::default());
    }
}
