use std::path::PathBuf;

use anyhow::{Context, bail};

use nba_iq_terminal::comparison::build_comparison;
use nba_iq_terminal::config::AppConfig;
use nba_iq_terminal::dataset::load_dataset;
use nba_iq_terminal::export::{chart_spec_json, export_path, write_chart_spec_json};
use nba_iq_terminal::metrics::metric_schema;

/// Usage: chart_spec "<player 1>" "<player 2>" [--out <dir>]
///
/// Prints the comparison chart spec as JSON, or writes
/// `<dir>/nba-iq <player 1> vs <player 2>.json` with `--out`.
fn main() -> anyhow::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    let config = AppConfig::from_env();

    let mut args = std::env::args().skip(1);
    let left = args.next().unwrap_or_else(|| config.compare_left.clone());
    let right = args.next().unwrap_or_else(|| config.compare_right.clone());
    let out_dir = match (args.next().as_deref(), args.next()) {
        (Some("--out"), Some(dir)) => Some(PathBuf::from(dir)),
        (None, _) => None,
        (Some(other), _) => bail!("unexpected argument: {other}"),
    };

    let dataset = load_dataset(&config.players_path)?;
    let spec = build_comparison(&dataset, &left, &right, metric_schema())
        .context("cannot build comparison")?;

    match out_dir {
        Some(dir) => {
            let path = export_path(&dir, &spec, "json");
            let report = write_chart_spec_json(&path, &spec)?;
            println!("wrote {} metrics to {}", report.rows, report.path.display());
        }
        None => println!("{}", chart_spec_json(&spec)?),
    }
    Ok(())
}
