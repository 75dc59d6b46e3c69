use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use tracing::{info, warn};

use nba_iq_terminal::comparison::{BarColor, ChartBar, ChartSpec, TextColor, TextPosition};
use nba_iq_terminal::config::AppConfig;
use nba_iq_terminal::error::Side;
use nba_iq_terminal::model::{Dataset, TeamDirectory};
use nba_iq_terminal::percentile::{ColorBand, PercentileRow};
use nba_iq_terminal::rankings::filter_summary;
use nba_iq_terminal::state::{AppState, FilterField, Screen, ViewMode};
use nba_iq_terminal::{dataset, export, logging};

struct App {
    state: AppState,
    config: AppConfig,
    should_quit: bool,
}

impl App {
    fn new(state: AppState, config: AppConfig) -> Self {
        Self {
            state,
            config,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.filter_editing.is_some() {
            self.on_filter_key(key);
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.state.screen = Screen::Rankings,
            KeyCode::Char('2') => {
                self.state.screen = Screen::Comparison;
                if self.state.comparison.is_none() && self.state.comparison_error.is_none() {
                    self.state.rebuild_comparison();
                }
            }
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => match self.state.screen {
                Screen::Rankings => self.on_rankings_key(key),
                Screen::Comparison => self.on_comparison_key(key),
            },
        }
    }

    fn on_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.state.end_filter_edit(),
            KeyCode::Tab => {
                let next = match self.state.filter_editing {
                    Some(FilterField::Minutes) => FilterField::Games,
                    _ => FilterField::Minutes,
                };
                self.state.begin_filter_edit(next);
            }
            KeyCode::Backspace => self.state.pop_filter_char(),
            KeyCode::Char(c) => self.state.push_filter_char(c),
            _ => {}
        }
    }

    fn on_rankings_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('s') => self.state.toggle_sort(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.state.select_cursor_player() {
                    if let Some(p) = self.state.selected_player() {
                        let msg = format!("[INFO] Selected {}", p.name);
                        self.state.push_log(msg);
                    }
                }
            }
            KeyCode::Char('x') | KeyCode::Esc => {
                if self.state.select_player(None) {
                    self.state.push_log("[INFO] Selection cleared");
                }
            }
            KeyCode::Char('v') => self.state.toggle_view_mode(),
            KeyCode::Char('m') => self.state.begin_filter_edit(FilterField::Minutes),
            KeyCode::Char('g') => self.state.begin_filter_edit(FilterField::Games),
            KeyCode::Char('c') => self.state.clear_filters(),
            KeyCode::Char('a') => self.pick_cursor_for(Side::Left),
            KeyCode::Char('b') => self.pick_cursor_for(Side::Right),
            KeyCode::Char('e') => self.export_rankings(),
            _ => {}
        }
    }

    fn on_comparison_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => self.state.switch_compare_slot(),
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Down => {
                self.state.cycle_compare_pick(true)
            }
            KeyCode::Char('h') | KeyCode::Left | KeyCode::Up => {
                self.state.cycle_compare_pick(false)
            }
            KeyCode::Enter | KeyCode::Char('r') => self.state.rebuild_comparison(),
            KeyCode::Char('e') => self.export_comparison(),
            KeyCode::Char('J') => self.export_chart_json(),
            _ => {}
        }
    }

    fn pick_cursor_for(&mut self, side: Side) {
        let Some(name) = self.state.cursor_player().map(|p| p.name.clone()) else {
            self.state.push_log("[INFO] No player under cursor");
            return;
        };
        self.state.push_log(format!("[INFO] {side}: {name}"));
        self.state.set_compare_pick(side, name);
        self.state.comparison = None;
        self.state.comparison_error = None;
    }

    fn export_rankings(&mut self) {
        let path = self.config.export_dir.join("nba-iq rankings.xlsx");
        let result = {
            let rows = self.state.ranked_players();
            export::export_rankings_xlsx(&path, &rows)
        };
        match result {
            Ok(report) => self.state.push_log(format!(
                "[INFO] Exported {} players to {}",
                report.rows,
                report.path.display()
            )),
            Err(err) => {
                warn!(error = %err, "rankings export failed");
                self.state.push_log(format!("[WARN] Export failed: {err}"));
            }
        }
    }

    fn export_comparison(&mut self) {
        let Some(spec) = self.state.comparison.as_ref() else {
            self.state.push_log("[INFO] Generate a chart before exporting");
            return;
        };
        let path = export::export_path(&self.config.export_dir, spec, "xlsx");
        let result = export::export_comparison_xlsx(&path, spec);
        self.report_export(result);
    }

    fn export_chart_json(&mut self) {
        let Some(spec) = self.state.comparison.as_ref() else {
            self.state.push_log("[INFO] Generate a chart before exporting");
            return;
        };
        let path = export::export_path(&self.config.export_dir, spec, "json");
        let result = export::write_chart_spec_json(&path, spec);
        self.report_export(result);
    }

    fn report_export(&mut self, result: anyhow::Result<export::ExportReport>) {
        match result {
            Ok(report) => self.state.push_log(format!(
                "[INFO] Exported {} metrics to {}",
                report.rows,
                report.path.display()
            )),
            Err(err) => {
                warn!(error = %err, "comparison export failed");
                self.state.push_log(format!("[WARN] Export failed: {err}"));
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = AppConfig::from_env();
    if let Err(err) = logging::init(&config) {
        eprintln!("warning: {err:#}");
    }

    let mut state = load_state(&config);
    state.set_compare_pick(Side::Left, config.compare_left.clone());
    state.set_compare_pick(Side::Right, config.compare_right.clone());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(state, config);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

/// Load the snapshot once. A missing or broken file leaves an empty,
/// still usable app with the reason in the console.
fn load_state(config: &AppConfig) -> AppState {
    let mut notes = Vec::new();
    let players = match dataset::load_dataset(&config.players_path) {
        Ok(ds) => ds,
        Err(err) => {
            let reason = format!("{err:#}");
            warn!(error = %reason, "dataset unavailable");
            notes.push(format!("[WARN] {reason}"));
            Dataset::default()
        }
    };
    let teams = match dataset::load_teams(&config.teams_path) {
        Ok(teams) => teams,
        Err(err) => {
            let reason = format!("{err:#}");
            warn!(error = %reason, "team names unavailable");
            notes.push(format!("[WARN] {reason}"));
            TeamDirectory::default()
        }
    };
    info!(players = players.len(), teams = teams.len(), "starting ui");

    let mut state = AppState::new(players, teams);
    state.push_log(format!("[INFO] Loaded {} players", state.dataset.len()));
    for note in notes {
        state.push_log(note);
    }
    state
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Rankings => render_rankings(frame, chunks[1], &app.state),
        Screen::Comparison => render_comparison(frame, chunks[1], &app.state),
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(&app.state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    match state.screen {
        Screen::Rankings => format!(
            "NBA-IQ | RANKINGS | Sort: rank {} | {}",
            state.sort.arrow(),
            filter_summary(state.ranked_players().len())
        ),
        Screen::Comparison => "NBA-IQ | COMPARISON".to_string(),
    }
}

fn footer_text(state: &AppState) -> String {
    if state.filter_editing.is_some() {
        return "type a number | Tab Switch field | Backspace Delete | Enter/Esc Done".to_string();
    }
    match state.screen {
        Screen::Rankings => {
            "1 Rankings | 2 Compare | j/k Move | Enter Select | x Clear | s Sort | m/g Filters | c Reset | v View | a/b Pick | e Export | ? Help | q Quit".to_string()
        }
        Screen::Comparison => {
            "1 Rankings | Tab Slot | h/l Player | Enter Generate | e Export xlsx | J Export json | ? Help | q Quit".to_string()
        }
    }
}

fn render_rankings(frame: &mut Frame, area: Rect, state: &AppState) {
    let detail_height = if state.selected_player().is_some() {
        (state.schema.len() as u16) + 6
    } else {
        0
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(detail_height)])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(50), Constraint::Length(28)])
        .split(rows[0]);

    render_player_table(frame, top[0], state);
    render_filters(frame, top[1], state);

    if detail_height > 0 {
        render_player_detail(frame, rows[1], state);
    }
}

fn table_columns() -> [Constraint; 6] {
    [
        Constraint::Length(8),
        Constraint::Min(24),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(5),
        Constraint::Length(7),
    ]
}

fn render_player_table(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Players").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 2 {
        return;
    }

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);
    let widths = table_columns();

    let header_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(sections[0]);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let rank_header = format!("rank {}", state.sort.arrow());
    for (col, text) in header_cols
        .iter()
        .zip([rank_header.as_str(), "player", "pos", "mpg", "gp", "iq"])
    {
        render_cell_text(frame, *col, text, bold);
    }

    let list_area = sections[1];
    let players = state.ranked_players();
    if players.is_empty() {
        let empty = Paragraph::new("No players match these filters")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }

    let visible = list_area.height as usize;
    let (start, end) = visible_range(state.cursor, players.len(), visible);
    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };
        let p = players[idx];
        let is_selected = state.selected_player.as_deref() == Some(p.name.as_str());
        let row_style = if idx == state.cursor {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else if is_selected {
            Style::default().fg(Color::LightBlue)
        } else {
            Style::default()
        };
        if idx == state.cursor {
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);
        render_cell_text(frame, cols[0], &p.rank.to_string(), row_style.add_modifier(Modifier::BOLD));
        render_cell_text(frame, cols[1], &p.name, row_style);
        render_cell_text(frame, cols[2], &p.position, row_style);
        render_cell_text(frame, cols[3], &p.minutes.to_string(), row_style);
        render_cell_text(frame, cols[4], &p.games.to_string(), row_style);
        render_cell_text(
            frame,
            cols[5],
            &p.iq_score.to_string(),
            row_style.fg(Color::LightBlue).add_modifier(Modifier::BOLD),
        );
    }
}

fn render_filters(frame: &mut Frame, area: Rect, state: &AppState) {
    let field = |label: &str, value: &str, editing: bool| {
        let shown = if value.is_empty() { "0" } else { value };
        let marker = if editing { "_" } else { "" };
        let style = if editing {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::styled(format!("{label}: "), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("{shown}{marker}"), style),
        ])
    };
    let lines = vec![
        field(
            "minimum MPG",
            &state.minutes_input,
            state.filter_editing == Some(FilterField::Minutes),
        ),
        field(
            "minimum GP",
            &state.games_input,
            state.filter_editing == Some(FilterField::Games),
        ),
        Line::from(""),
        Line::from(Span::styled(
            filter_summary(state.ranked_players().len()),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let filters = Paragraph::new(lines).block(Block::default().title("Filters").borders(Borders::ALL));
    frame.render_widget(filters, area);
}

fn render_player_detail(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(player) = state.selected_player() else {
        return;
    };
    let block = Block::default().title(player.name.as_str()).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let team = state.selected_team_name().unwrap_or("Unknown team");
    let mode = |label: &'static str, active: bool| {
        if active {
            Span::styled(format!("[{label}]"), Style::default().fg(Color::Black).bg(Color::LightBlue))
        } else {
            Span::styled(format!(" {label} "), Style::default().fg(Color::LightBlue))
        }
    };
    let mut lines = vec![
        Line::from(vec![
            Span::raw(format!("{}, {team}   ", player.position)),
            Span::styled(
                format!("{}", player.iq_score),
                Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" basketball IQ", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(vec![
            Span::styled("IQ Indicators  ", Style::default().add_modifier(Modifier::BOLD)),
            mode("Percentiles", state.view_mode == ViewMode::Percentiles),
            Span::raw(" "),
            mode("Distributions", state.view_mode == ViewMode::Distributions),
        ]),
        Line::from(""),
    ];

    match state.detail_rows() {
        Some(rows) => {
            let bar_width = (inner.width as usize).saturating_sub(32 + 30).clamp(10, 50);
            lines.extend(rows.iter().map(|row| percentile_line(row, bar_width)));
        }
        None => lines.push(Line::from(Span::styled(
            "Histogram distributions coming soon...",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn percentile_line(row: &PercentileRow, bar_width: usize) -> Line<'static> {
    let filled = ((row.percentile / 100.0) * bar_width as f64).round() as usize;
    let filled = filled.min(bar_width);
    let name = if row.position_relative {
        format!("{}*", row.name)
    } else {
        row.name.to_string()
    };
    Line::from(vec![
        Span::styled(format!("{name:<30} "), Style::default().fg(Color::Gray)),
        Span::styled("█".repeat(filled), Style::default().fg(band_color(row.band))),
        Span::styled("░".repeat(bar_width - filled), Style::default().fg(Color::DarkGray)),
        Span::styled(format!(" {}", row.text), Style::default().fg(Color::Gray)),
    ])
}

fn band_color(band: ColorBand) -> Color {
    match band {
        ColorBand::High => Color::Green,
        ColorBand::MediumHigh => Color::Yellow,
        ColorBand::MediumLow => Color::Rgb(253, 126, 20),
        ColorBand::Low => Color::Red,
    }
}

fn render_comparison(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let slot = |side: Side| {
        let name = state.compare_pick(side);
        let shown = if name.is_empty() { "Select a player..." } else { name };
        let style = if state.compare_slot == side {
            Style::default().fg(Color::Black).bg(Color::LightBlue)
        } else {
            Style::default()
        };
        vec![
            Span::styled(format!("{side}: "), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(shown.to_string(), style),
            Span::raw("   "),
        ]
    };
    let mut picks = slot(Side::Left);
    picks.extend(slot(Side::Right));
    let controls = Paragraph::new(Line::from(picks))
        .block(Block::default().title("Players").borders(Borders::ALL));
    frame.render_widget(controls, sections[0]);

    let chart_area = sections[1];
    if let Some(err) = state.comparison_error.as_deref() {
        let msg = Paragraph::new(err.to_string())
            .style(Style::default().fg(Color::Red))
            .block(Block::default().title("Chart").borders(Borders::ALL));
        frame.render_widget(msg, chart_area);
        return;
    }
    let Some(spec) = state.comparison.as_ref() else {
        let msg = Paragraph::new("Press Enter to generate the chart")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title("Chart").borders(Borders::ALL));
        frame.render_widget(msg, chart_area);
        return;
    };
    render_chart(frame, chart_area, spec);
}

const LABEL_WIDTH: usize = 24;

fn render_chart(frame: &mut Frame, area: Rect, spec: &ChartSpec) {
    let title = spec.title.replace('\n', " | ");
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let half = (inner.width as usize).saturating_sub(LABEL_WIDTH + 1) / 2;
    if half < 10 {
        frame.render_widget(Paragraph::new("Chart needs a wider terminal"), inner);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    let name_rows = spec.left.name_lines.len().max(spec.right.name_lines.len());
    for i in 0..name_rows {
        let left = spec.left.name_lines.get(i).map(String::as_str).unwrap_or("");
        let right = spec.right.name_lines.get(i).map(String::as_str).unwrap_or("");
        lines.push(header_line(left, right, half, Style::default().add_modifier(Modifier::BOLD)));
    }
    lines.push(header_line(
        &spec.left.iq_text,
        &spec.right.iq_text,
        half,
        Style::default().fg(Color::Gray),
    ));
    lines.push(Line::from(""));

    // Rows are kept top to bottom; `category_axis` is the same list bottom to top.
    for row in &spec.rows {
        let mut spans = vec![Span::styled(
            format!("{:>width$} ", truncate(row.metric, LABEL_WIDTH - 1), width = LABEL_WIDTH - 1),
            Style::default().fg(Color::Gray),
        )];
        spans.extend(half_bar(&row.left, half, Side::Left));
        spans.push(Span::styled("│", Style::default().fg(Color::White)));
        spans.extend(half_bar(&row.right, half, Side::Right));
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw(" ".repeat(LABEL_WIDTH)),
        Span::styled(axis_ticks(spec, half), Style::default().fg(Color::DarkGray)),
    ]));
    lines.push(Line::from(vec![
        Span::raw(" ".repeat(LABEL_WIDTH + half.saturating_sub(spec.value_axis.caption.len() / 2))),
        Span::styled(spec.value_axis.caption, Style::default().add_modifier(Modifier::BOLD)),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn header_line(left: &str, right: &str, half: usize, style: Style) -> Line<'static> {
    Line::from(vec![
        Span::raw(" ".repeat(LABEL_WIDTH)),
        Span::styled(format!("{:>half$} ", truncate(left, half.saturating_sub(1))), style),
        Span::styled(format!(" {}", truncate(right, half.saturating_sub(1))), style),
    ])
}

/// One side of a diverging row, `width` cells wide. Left bars grow leftwards
/// from the center line.
fn half_bar(bar: &ChartBar, width: usize, side: Side) -> Vec<Span<'static>> {
    let filled = (((bar.percentile / 100.0) * width as f64).round() as usize).min(width);
    let fill = Style::default().bg(bar_fill(bar.bar_color));
    let text_len = bar.text.chars().count();

    if bar.text_position == TextPosition::Inside && text_len <= filled {
        let text_style = fill.fg(text_fg(bar.text_color));
        let pad = " ".repeat(width - filled);
        return match side {
            Side::Left => vec![
                Span::raw(pad),
                Span::styled(format!("{:<filled$}", bar.text), text_style),
            ],
            Side::Right => vec![
                Span::styled(format!("{:>filled$}", bar.text), text_style),
                Span::raw(pad),
            ],
        };
    }

    let room = width - filled;
    let label = truncate(&bar.text, room.saturating_sub(1));
    let label_style = Style::default().fg(Color::Gray);
    match side {
        Side::Left => vec![
            Span::styled(format!("{:>room$}", format!("{label} ")), label_style),
            Span::styled(" ".repeat(filled), fill),
        ],
        Side::Right => vec![
            Span::styled(" ".repeat(filled), fill),
            Span::styled(format!("{:<room$}", format!(" {label}")), label_style),
        ],
    }
}

fn axis_ticks(spec: &ChartSpec, half: usize) -> String {
    let total = half * 2 + 1;
    let mut cells = vec![' '; total + 4];
    let mut last_end = 0usize;
    for tick in &spec.value_axis.ticks {
        let center = half as f64 + (tick.value as f64 / 100.0) * half as f64;
        let len = tick.label.chars().count();
        let start = (center.round() as usize).saturating_sub(len / 2);
        if start < last_end || start + len > cells.len() {
            continue;
        }
        for (i, ch) in tick.label.chars().enumerate() {
            cells[start + i] = ch;
        }
        last_end = start + len + 1;
    }
    cells.into_iter().collect()
}

fn bar_fill(color: BarColor) -> Color {
    match color {
        BarColor::Highlighted => Color::Rgb(13, 110, 253),
        BarColor::Neutral => Color::Rgb(206, 212, 218),
    }
}

fn text_fg(color: TextColor) -> Color {
    match color {
        TextColor::Dark => Color::Black,
        TextColor::Light => Color::White,
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max).collect()
    }
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let paragraph = Paragraph::new(text.to_string()).style(style);
    frame.render_widget(paragraph, area);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    let skip = state.logs.len().saturating_sub(2);
    state
        .logs
        .iter()
        .skip(skip)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "NBA-IQ Terminal - Help",
        "",
        "Global:",
        "  1            Rankings",
        "  2            Comparison",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Rankings:",
        "  j/k or ↑/↓   Move",
        "  Enter        Show player details",
        "  x / Esc      Hide details",
        "  s            Toggle rank sort",
        "  m / g        Edit minimum MPG / GP",
        "  c            Reset filters",
        "  v            Percentiles / Distributions",
        "  a / b        Use player as comparison player 1 / 2",
        "  e            Export table (xlsx)",
        "",
        "Comparison:",
        "  Tab          Switch player slot",
        "  h/l or ←/→   Change player",
        "  Enter / r    Generate chart",
        "  e / J        Export xlsx / chart json",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
