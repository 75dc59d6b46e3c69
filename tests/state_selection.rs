use std::fs;
use std::path::PathBuf;

use nba_iq_terminal::dataset::{parse_players_json, parse_teams_json};
use nba_iq_terminal::error::Side;
use nba_iq_terminal::model::Dataset;
use nba_iq_terminal::rankings::SortDirection;
use nba_iq_terminal::state::{AppState, FilterField, ViewMode};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn fixture_state() -> AppState {
    let players = parse_players_json(&read_fixture("players.json")).expect("fixture should parse");
    let teams = parse_teams_json(&read_fixture("teams.json")).expect("fixture should parse");
    AppState::new(Dataset::new(players), teams)
}

#[test]
fn selecting_is_idempotent() {
    let mut state = fixture_state();
    assert!(state.selected_player().is_none());
    assert!(state.detail_rows().is_none());

    assert!(state.select_player(Some("LeBron James")));
    assert!(!state.select_player(Some("LeBron James")));
    assert!(!state.select_player(Some("lebron james")));
    assert_eq!(state.selected_team_name(), Some("Los Angeles Lakers"));

    assert!(state.select_player(None));
    assert!(!state.select_player(None));
    assert!(state.selected_player().is_none());
}

#[test]
fn unknown_name_keeps_current_selection() {
    let mut state = fixture_state();
    state.select_player(Some("A"));
    assert!(!state.select_player(Some("Nobody")));
    assert_eq!(state.selected_player().map(|p| p.name.as_str()), Some("A"));
}

#[test]
fn detail_rows_depend_on_view_mode() {
    let mut state = fixture_state();
    state.select_player(Some("A"));
    let rows = state.detail_rows().expect("percentile view shows rows");
    assert_eq!(rows.len(), state.schema.len());
    assert_eq!(rows[0].text, "3.5 (80th percentile)");

    state.toggle_view_mode();
    assert_eq!(state.view_mode, ViewMode::Distributions);
    assert!(state.detail_rows().is_none());
    assert_eq!(state.selected_player().map(|p| p.name.as_str()), Some("A"));

    state.set_view_mode(ViewMode::Percentiles);
    assert!(state.detail_rows().is_some());
}

#[test]
fn filter_inputs_drive_the_ranked_list() {
    let mut state = fixture_state();
    assert_eq!(state.ranked_players().len(), 4);

    state.begin_filter_edit(FilterField::Minutes);
    for c in "15".chars() {
        state.push_filter_char(c);
    }
    state.end_filter_edit();
    let names: Vec<&str> = state.ranked_players().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["A", "LeBron James"]);

    state.begin_filter_edit(FilterField::Games);
    for c in "71".chars() {
        state.push_filter_char(c);
    }
    assert!(state.ranked_players().is_empty());
    assert_eq!(state.cursor, 0);
    state.pop_filter_char();
    assert_eq!(state.games_input, "7");
    assert_eq!(state.ranked_players().len(), 2);

    state.clear_filters();
    assert_eq!(state.ranked_players().len(), 4);
    assert!(state.filter_editing.is_none());
}

#[test]
fn cursor_wraps_and_follows_sort_toggle() {
    let mut state = fixture_state();
    state.select_prev();
    assert_eq!(state.cursor, 3);
    state.select_next();
    assert_eq!(state.cursor, 0);
    state.select_next();
    assert_eq!(state.cursor_player().map(|p| p.name.as_str()), Some("B"));

    state.toggle_sort();
    assert_eq!(state.sort, SortDirection::Descending);
    assert_eq!(state.cursor, 2);
    assert_eq!(state.cursor_player().map(|p| p.name.as_str()), Some("B"));

    assert!(state.select_cursor_player());
    assert_eq!(state.selected_player().map(|p| p.name.as_str()), Some("B"));
}

#[test]
fn rebuild_comparison_never_keeps_a_stale_chart() {
    let mut state = fixture_state();
    state.rebuild_comparison();
    assert!(state.comparison.is_none());
    assert_eq!(state.comparison_error.as_deref(), Some("Please select both players"));

    state.set_compare_pick(Side::Left, "A");
    state.set_compare_pick(Side::Right, "B");
    state.rebuild_comparison();
    assert!(state.comparison_error.is_none());
    assert_eq!(state.comparison.as_ref().map(|c| c.rows.len()), Some(2));

    state.set_compare_pick(Side::Right, "Ghost");
    state.rebuild_comparison();
    assert!(state.comparison.is_none());
    assert_eq!(
        state.comparison_error.as_deref(),
        Some("Player not found: Ghost (player 2)")
    );
    assert!(state.logs.back().is_some_and(|l| l.starts_with("[WARN]")));
}

#[test]
fn cycling_picks_walks_sorted_names() {
    let mut state = fixture_state();
    state.cycle_compare_pick(true);
    assert_eq!(state.compare_pick(Side::Left), "A");
    state.cycle_compare_pick(false);
    assert_eq!(state.compare_pick(Side::Left), "Short Minutes");

    state.switch_compare_slot();
    state.cycle_compare_pick(true);
    assert_eq!(state.compare_pick(Side::Right), "A");
    assert_eq!(state.compare_pick(Side::Left), "Short Minutes");
}
