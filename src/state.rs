use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::comparison::{ChartSpec, PlayerOption, build_comparison, player_options};
use crate::error::Side;
use crate::metrics::{MetricDef, metric_schema};
use crate::model::{Dataset, Player, TeamDirectory};
use crate::percentile::{PercentileRow, percentile_rows};
use crate::rankings::{SortDirection, Thresholds, ranked_view};

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Rankings,
    Comparison,
}

/// What the detail panel shows for the selected player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Percentiles,
    // Placeholder panel; no distribution data ships with the dataset yet.
    Distributions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Minutes,
    Games,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub dataset: Dataset,
    pub teams: TeamDirectory,
    pub schema: &'static [MetricDef],
    pub screen: Screen,
    pub sort: SortDirection,
    pub minutes_input: String,
    pub games_input: String,
    pub filter_editing: Option<FilterField>,
    pub cursor: usize,
    pub selected_player: Option<String>,
    pub view_mode: ViewMode,
    pub compare_left: String,
    pub compare_right: String,
    pub compare_slot: Side,
    pub comparison: Option<ChartSpec>,
    pub comparison_error: Option<String>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Dataset::default(), TeamDirectory::default())
    }
}

impl AppState {
    pub fn new(dataset: Dataset, teams: TeamDirectory) -> Self {
        Self {
            dataset,
            teams,
            schema: metric_schema(),
            screen: Screen::Rankings,
            sort: SortDirection::Ascending,
            minutes_input: String::new(),
            games_input: String::new(),
            filter_editing: None,
            cursor: 0,
            selected_player: None,
            view_mode: ViewMode::Percentiles,
            compare_left: String::new(),
            compare_right: String::new(),
            compare_slot: Side::Left,
            comparison: None,
            comparison_error: None,
            logs: VecDeque::new(),
            help_overlay: false,
        }
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds::from_inputs(&self.minutes_input, &self.games_input)
    }

    pub fn ranked_players(&self) -> Vec<&Player> {
        ranked_view(self.dataset.players(), self.thresholds(), self.sort)
    }

    pub fn cursor_player(&self) -> Option<&Player> {
        self.ranked_players().get(self.cursor).copied()
    }

    pub fn toggle_sort(&mut self) {
        let cursor_name = self.cursor_player().map(|p| p.name.clone());
        self.sort = self.sort.toggle();
        self.cursor = 0;
        if let Some(name) = cursor_name {
            if let Some(pos) = self.ranked_players().iter().position(|p| p.name == name) {
                self.cursor = pos;
            }
        }
    }

    pub fn select_next(&mut self) {
        let total = self.ranked_players().len();
        if total == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = (self.cursor + 1) % total;
    }

    pub fn select_prev(&mut self) {
        let total = self.ranked_players().len();
        if total == 0 {
            self.cursor = 0;
            return;
        }
        if self.cursor == 0 {
            self.cursor = total - 1;
        } else {
            self.cursor -= 1;
        }
    }

    pub fn clamp_cursor(&mut self) {
        let total = self.ranked_players().len();
        if total == 0 {
            self.cursor = 0;
        } else if self.cursor >= total {
            self.cursor = total - 1;
        }
    }

    /// Select a player by name, or deselect with `None`.
    ///
    /// Returns whether the selection changed. Selecting the current player
    /// again, or a name that is not in the dataset, leaves state untouched.
    pub fn select_player(&mut self, name: Option<&str>) -> bool {
        let Some(name) = name else {
            return self.selected_player.take().is_some();
        };
        let Some(player) = self.dataset.find(name) else {
            warn!(name, "select_player: unknown player");
            return false;
        };
        if self.selected_player.as_deref() == Some(player.name.as_str()) {
            return false;
        }
        debug!(name = %player.name, "player selected");
        self.selected_player = Some(player.name.clone());
        true
    }

    pub fn select_cursor_player(&mut self) -> bool {
        let name = self.cursor_player().map(|p| p.name.clone());
        match name {
            Some(name) => self.select_player(Some(&name)),
            None => false,
        }
    }

    pub fn selected_player(&self) -> Option<&Player> {
        self.selected_player
            .as_deref()
            .and_then(|name| self.dataset.find(name))
    }

    pub fn selected_team_name(&self) -> Option<&str> {
        self.selected_player().and_then(|p| self.teams.name(p.team))
    }

    /// Detail panel rows; `None` when nothing is selected or the
    /// distribution placeholder is showing.
    pub fn detail_rows(&self) -> Option<Vec<PercentileRow>> {
        if self.view_mode != ViewMode::Percentiles {
            return None;
        }
        self.selected_player()
            .map(|player| percentile_rows(player, self.schema))
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn toggle_view_mode(&mut self) {
        self.view_mode = match self.view_mode {
            ViewMode::Percentiles => ViewMode::Distributions,
            ViewMode::Distributions => ViewMode::Percentiles,
        };
    }

    pub fn begin_filter_edit(&mut self, field: FilterField) {
        self.filter_editing = Some(field);
    }

    pub fn end_filter_edit(&mut self) {
        self.filter_editing = None;
    }

    pub fn push_filter_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        if let Some(input) = self.filter_input_mut() {
            input.push(c);
            self.clamp_cursor();
        }
    }

    pub fn pop_filter_char(&mut self) {
        if let Some(input) = self.filter_input_mut() {
            input.pop();
            self.clamp_cursor();
        }
    }

    pub fn clear_filters(&mut self) {
        self.minutes_input.clear();
        self.games_input.clear();
        self.filter_editing = None;
        self.clamp_cursor();
    }

    fn filter_input_mut(&mut self) -> Option<&mut String> {
        match self.filter_editing? {
            FilterField::Minutes => Some(&mut self.minutes_input),
            FilterField::Games => Some(&mut self.games_input),
        }
    }

    pub fn set_compare_pick(&mut self, side: Side, name: impl Into<String>) {
        match side {
            Side::Left => self.compare_left = name.into(),
            Side::Right => self.compare_right = name.into(),
        }
    }

    pub fn compare_pick(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.compare_left,
            Side::Right => &self.compare_right,
        }
    }

    pub fn switch_compare_slot(&mut self) {
        self.compare_slot = match self.compare_slot {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        };
    }

    /// Step the active slot's pick through the name-sorted player list.
    pub fn cycle_compare_pick(&mut self, forward: bool) {
        let options: Vec<PlayerOption> = player_options(&self.dataset);
        if options.is_empty() {
            return;
        }
        let current = self.compare_pick(self.compare_slot).to_lowercase();
        let pos = options
            .iter()
            .position(|o| o.name.to_lowercase() == current);
        let next = match (pos, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1) % options.len(),
            (Some(0), false) => options.len() - 1,
            (Some(i), false) => i - 1,
        };
        let name = options[next].name.clone();
        self.set_compare_pick(self.compare_slot, name);
    }

    /// Rebuild the chart from the current picks. On failure the previous
    /// chart is discarded and only the error message remains.
    pub fn rebuild_comparison(&mut self) {
        if self.compare_left.trim().is_empty() || self.compare_right.trim().is_empty() {
            self.comparison = None;
            self.comparison_error = Some("Please select both players".to_string());
            return;
        }
        match build_comparison(
            &self.dataset,
            &self.compare_left,
            &self.compare_right,
            self.schema,
        ) {
            Ok(spec) => {
                self.push_log(format!(
                    "[INFO] Comparison: {} vs {} ({} metrics)",
                    spec.left.name,
                    spec.right.name,
                    spec.rows.len()
                ));
                self.comparison = Some(spec);
                self.comparison_error = None;
            }
            Err(err) => {
                self.push_log(format!("[WARN] {err}"));
                self.comparison = None;
                self.comparison_error = Some(err.to_string());
            }
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}
