// benches/aggregate.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use wurstliga::engine::{Fixture, Ladder, Round, RoundClassifier, Score, StandingsAggregator};

const TIPPERS: usize = 24;
const ROUNDS: u32 = 34;
const MATCHES: usize = 9;

/// Full synthetic season: 30 complete rounds, one in progress, the rest
/// not started. Scores are spread so every round has a few ties.
fn synthetic_season() -> Vec<Round> {
    (1..=ROUNDS)
        .map(|n| {
            let results = match n {
                1..=30 => MATCHES,
                31 => 4,
                _ => 0,
            };
            let fixtures = (0..MATCHES)
                .map(|i| {
                    let f = Fixture::new(format!("Heim {i}"), format!("Gast {i}"));
                    if i < results { f.with_result((i % 4) as u32, (n % 3) as u32) } else { f }
                })
                .collect();
            let scores = (0..TIPPERS)
                .map(|t| Score::new(format!("Tipper {t:02}"), ((t as u32 * 7 + n * 3) % 19) / 2))
                .collect();
            Round::new(n, fixtures).with_scores(scores)
        })
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let rounds = synthetic_season();
    let ladder = Ladder::new((1..=TIPPERS as i64).rev().collect()).expect("non-empty ladder");
    let classifier = RoundClassifier::new(MATCHES);

    c.bench_function("classify_season", |b| {
        b.iter(|| {
            let done = black_box(&rounds)
                .iter()
                .filter(|r| classifier.classify(r).is_ok())
                .count();
            black_box(done)
        })
    });

    c.bench_function("aggregate_season", |b| {
        let agg = StandingsAggregator::new(classifier, &ladder);
        b.iter(|| {
            let standings = agg.aggregate(black_box(&rounds)).expect("synthetic season is well-formed");
            black_box(standings.entries.len())
        })
    });
}

criterion_group!(benches, bench_aggregate);
criterion_main!(benches);
