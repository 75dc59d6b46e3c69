use std::collections::BTreeMap;

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use nba_iq_terminal::comparison::build_comparison;
use nba_iq_terminal::dataset::parse_players_json;
use nba_iq_terminal::metrics::metric_schema;
use nba_iq_terminal::model::{Dataset, MetricValue, Player};
use nba_iq_terminal::rankings::{SortDirection, Thresholds, ranked_view};


fn sample_players(count: u32) -> Vec<Player> {
    (0..count)
        .map(|i| {
            let metrics = metric_schema()
                .iter()
                .enumerate()
                .map(|(j, def)| {
                    let pct = f64::from((i * 7 + j as u32 * 13) % 101);
                    (def.id.to_string(), MetricValue::new(pct / 10.0, "", pct))
                })
                .collect::<BTreeMap<_, _>>();
            Player {
                name: format!("Player {i}"),
                position: "G".to_string(),
                team: i % 30,
                // Reverse-ish rank order so the sort has work to do.
                rank: count - i,
                minutes: f64::from(i % 40),
                games: i % 83,
                iq_score: f64::from(i % 100),
                metrics,
            }
        })
        .collect()
}

fn bench_players_parse(c: &mut Criterion) {
    c.bench_function("players_parse", |b| {
        b.iter(|| {
            let players = parse_players_json(black_box(PLAYERS_JSON)).unwrap();
            black_box(players.len());
        })
    });
}

fn bench_ranked_view(c: &mut Criterion) {
    let players = sample_players(500);
    c.bench_function("ranked_view", |b| {
        b.iter(|| {
            let rows = ranked_view(
                black_box(&players),
                Thresholds::new(15.0, 20.0),
                SortDirection::Descending,
            );
            black_box(rows.len());
        })
    });
}

fn bench_build_comparison(c: &mut Criterion) {
    let dataset = Dataset::new(sample_players(500));
    c.bench_function("build_comparison", |b| {
        b.iter(|| {
            let spec = build_comparison(
                black_box(&dataset),
                "Player 17",
                "Player 480",
                metric_schema(),
            )
            .unwrap();
            black_box(spec.rows.len());
        })
    });
}

criterion_group!(
    perf,
    bench_players_parse,
    bench_ranked_view,
    bench_build_comparison
);
criterion_main!(perf);

static PLAYERS_JSON: &str = include_str!("../tests/fixtures/players.json");
