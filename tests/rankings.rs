use std::collections::BTreeMap;

use nba_iq_terminal::model::Player;
use nba_iq_terminal::rankings::{SortDirection, Thresholds, filter_summary, ranked_view};

fn player(name: &str, rank: u32, minutes: f64, games: u32) -> Player {
    Player {
        name: name.to_string(),
        position: "G".to_string(),
        team: 1,
        rank,
        minutes,
        games,
        iq_score: 100.0 - rank as f64,
        metrics: BTreeMap::new(),
    }
}

fn names(rows: &[&Player]) -> Vec<String> {
    rows.iter().map(|p| p.name.clone()).collect()
}

fn sample() -> Vec<Player> {
    vec![
        player("C", 3, 25.0, 40),
        player("A", 1, 30.0, 70),
        player("E", 5, 5.0, 82),
        player("B", 2, 10.0, 70),
        player("D", 4, 15.0, 12),
    ]
}

#[test]
fn filter_is_a_conjunction() {
    let players = sample();
    let grid = [0.0, 5.0, 10.0, 15.0, 15.5, 30.0, 31.0];
    let games = [0.0, 12.0, 40.0, 41.0, 70.0, 82.0, 83.0];
    for m in grid {
        for g in games {
            let rows = ranked_view(&players, Thresholds::new(m, g), SortDirection::Ascending);
            for p in &players {
                let expected = p.minutes >= m && f64::from(p.games) >= g;
                let included = rows.iter().any(|r| r.name == p.name);
                assert_eq!(included, expected, "{} at m={m} g={g}", p.name);
            }
        }
    }
}

#[test]
fn ascending_and_descending_mirror() {
    let players = sample();
    let asc = ranked_view(&players, Thresholds::default(), SortDirection::Ascending);
    let desc = ranked_view(&players, Thresholds::default(), SortDirection::Descending);
    assert_eq!(names(&asc), ["A", "B", "C", "D", "E"]);
    assert!(asc.windows(2).all(|w| w[0].rank < w[1].rank));

    let mut reversed = names(&asc);
    reversed.reverse();
    assert_eq!(names(&desc), reversed);
}

#[test]
fn equal_ranks_keep_input_order() {
    let players = vec![
        player("late", 2, 20.0, 10),
        player("first", 1, 20.0, 10),
        player("tie-a", 2, 20.0, 10),
    ];
    let asc = ranked_view(&players, Thresholds::default(), SortDirection::Ascending);
    assert_eq!(names(&asc), ["first", "late", "tie-a"]);
    let desc = ranked_view(&players, Thresholds::default(), SortDirection::Descending);
    assert_eq!(names(&desc), ["tie-a", "late", "first"]);
}

#[test]
fn text_inputs_are_normalized_once() {
    let players = sample();
    let t = Thresholds::from_inputs("15", "");
    assert_eq!(names(&ranked_view(&players, t, SortDirection::Ascending)), ["A", "C", "D"]);

    let junk = Thresholds::from_inputs("abc", "-3");
    assert_eq!(junk, Thresholds::default());
    assert_eq!(ranked_view(&players, junk, SortDirection::Ascending).len(), 5);
}

#[test]
fn empty_dataset_is_empty_output() {
    let rows = ranked_view(&[], Thresholds::new(10.0, 10.0), SortDirection::Descending);
    assert!(rows.is_empty());
    assert_eq!(filter_summary(rows.len()), "showing 0 players");
}
