use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use rust_xlsxwriter::{Workbook, Worksheet};
use tracing::info;

use crate::comparison::{BarColor, ChartSpec};
use crate::model::Player;

#[derive(Debug)]
pub struct ExportReport {
    pub path: PathBuf,
    pub rows: usize,
}

/// `<dir>/<export stem>.<ext>` for a built chart.
pub fn export_path(dir: &Path, spec: &ChartSpec, ext: &str) -> PathBuf {
    dir.join(format!("{}.{ext}", spec.export_stem))
}

/// Pretty JSON of a built chart, for an external plotting tool.
pub fn chart_spec_json(spec: &ChartSpec) -> Result<String> {
    serde_json::to_string_pretty(spec).context("serialize chart spec")
}

pub fn write_chart_spec_json(path: &Path, spec: &ChartSpec) -> Result<ExportReport> {
    let json = chart_spec_json(spec)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed writing chart spec to {}", path.display()))?;
    info!(path = %path.display(), rows = spec.rows.len(), "wrote chart spec");
    Ok(ExportReport {
        path: path.to_path_buf(),
        rows: spec.rows.len(),
    })
}

/// Comparison rows plus a summary sheet with both headers.
pub fn export_comparison_xlsx(path: &Path, spec: &ChartSpec) -> Result<ExportReport> {
    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Comparison")?;
        write_rows(sheet, &comparison_rows(spec))?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Summary")?;
        write_rows(sheet, &summary_rows(spec))?;
    }
    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;
    info!(path = %path.display(), rows = spec.rows.len(), "exported comparison workbook");

    Ok(ExportReport {
        path: path.to_path_buf(),
        rows: spec.rows.len(),
    })
}

/// The ranked table as currently filtered and sorted.
pub fn export_rankings_xlsx(path: &Path, players: &[&Player]) -> Result<ExportReport> {
    let mut rows = vec![vec![
        "Rank".to_string(),
        "Player".to_string(),
        "Pos".to_string(),
        "Team".to_string(),
        "MPG".to_string(),
        "GP".to_string(),
        "IQ".to_string(),
    ]];
    rows.extend(players.iter().map(|p| {
        vec![
            p.rank.to_string(),
            p.name.clone(),
            p.position.clone(),
            p.team.to_string(),
            p.minutes.to_string(),
            p.games.to_string(),
            p.iq_score.to_string(),
        ]
    }));

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Rankings")?;
        write_rows(sheet, &rows)?;
    }
    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;
    info!(path = %path.display(), rows = players.len(), "exported rankings workbook");

    Ok(ExportReport {
        path: path.to_path_buf(),
        rows: players.len(),
    })
}

fn comparison_rows(spec: &ChartSpec) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Metric".to_string(),
        spec.left.name.clone(),
        format!("{} Percentile", spec.left.name),
        spec.right.name.clone(),
        format!("{} Percentile", spec.right.name),
        "Leader".to_string(),
    ]];
    for row in &spec.rows {
        let leader = match (row.left.bar_color, row.right.bar_color) {
            (BarColor::Highlighted, _) => spec.left.name.clone(),
            (_, BarColor::Highlighted) => spec.right.name.clone(),
            _ => "tie".to_string(),
        };
        rows.push(vec![
            row.metric.to_string(),
            row.left.text.clone(),
            row.left.percentile.to_string(),
            row.right.text.clone(),
            row.right.percentile.to_string(),
            leader,
        ]);
    }
    rows
}

fn summary_rows(spec: &ChartSpec) -> Vec<Vec<String>> {
    vec![
        vec!["Title".to_string(), spec.title.replace('\n', " ")],
        vec![spec.left.name.clone(), spec.left.iq_text.clone()],
        vec![spec.right.name.clone(), spec.right.iq_text.clone()],
        vec!["Metrics".to_string(), spec.rows.len().to_string()],
        vec![
            "Generated".to_string(),
            Local::now().format("%Y-%m-%d %H:%M").to_string(),
        ],
    ]
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
