// tests/store_roundtrip.rs
use std::fs;

use wurstliga::config::Settings;
use wurstliga::engine::{Fixture, Round, RoundStatus, Score, StandingsAggregator};
use wurstliga::store::{self, Metadata, RoundDocument, StandingsDocument};

fn settings_in(dir: &std::path::Path) -> Settings {
    let mut s = Settings::default();
    s.data_dir = dir.to_path_buf();
    s.matches_per_round = 2;
    s
}

fn round(number: u32, results: usize, scores: &[(&str, u32)]) -> Round {
    let fixtures = (0..2)
        .map(|i| {
            let f = Fixture::new(format!("Heim {i}"), format!("Gast {i}"));
            if i < results { f.with_result(2, 1) } else { f }
        })
        .collect();
    Round::new(number, fixtures).with_scores(scores.iter().map(|&(n, p)| Score::new(n, p)).collect())
}

#[test]
fn rounds_come_back_in_file_order_with_status_recomputed() {
    let tmp = tempfile::tempdir().unwrap();
    let settings = settings_in(tmp.path());
    let classifier = settings.classifier();
    let dir = settings.rounds_dir();

    for r in [round(10, 0, &[("Anna", 0)]), round(2, 2, &[("Anna", 7)]), round(1, 1, &[("Anna", 3)])] {
        let doc = RoundDocument::classified(&settings.season, r, &classifier);
        store::save_round(&dir, &doc).unwrap();
    }
    assert!(dir.join("02.json").is_file());
    assert!(dir.join("10.json").is_file());

    // A stale status on disk must not survive a load
    let path = dir.join("02.json");
    let text = fs::read_to_string(&path).unwrap().replace("\"complete\"", "\"not_started\"");
    fs::write(&path, text).unwrap();

    let docs = store::load_documents(&dir).unwrap();
    let numbers: Vec<u32> = docs.iter().map(|d| d.round.number).collect();
    assert_eq!(numbers, vec![1, 2, 10]);
    assert!(docs.iter().all(|d| d.status.is_none()));
    assert_eq!(classifier.classify(&docs[1].round), Ok(RoundStatus::Complete));
    assert_eq!(docs[1].round.scores, vec![Score::new("Anna", 7)]);
}

#[test]
fn missing_round_dir_is_an_empty_season() {
    let tmp = tempfile::tempdir().unwrap();
    let settings = settings_in(tmp.path());
    assert!(store::load_rounds(&settings.rounds_dir()).unwrap().is_empty());
}

#[test]
fn metadata_and_standings_files_are_written() {
    let tmp = tempfile::tempdir().unwrap();
    let mut settings = settings_in(tmp.path());
    settings.ladder = wurstliga::engine::Ladder::new(vec![10, 8]).unwrap();
    let classifier = settings.classifier();

    let docs: Vec<RoundDocument> = [round(1, 2, &[("Anna", 9), ("Ben", 4)]), round(2, 1, &[("Anna", 1), ("Ben", 5)])]
        .into_iter()
        .map(|r| RoundDocument::classified(&settings.season, r, &classifier))
        .collect();
    for d in &docs {
        store::save_round(&settings.rounds_dir(), d).unwrap();
    }
    store::save_metadata(&settings.metadata_path(), &Metadata::from_documents(&settings.season, &docs)).unwrap();

    let meta: serde_json::Value = serde_json::from_str(&fs::read_to_string(settings.metadata_path()).unwrap()).unwrap();
    assert_eq!(meta["season"], "2025-26");
    assert_eq!(meta["rounds"]["1"]["status"], "complete");
    assert_eq!(meta["rounds"]["2"]["status"], "in_progress");

    let rounds = store::load_rounds(&settings.rounds_dir()).unwrap();
    let standings = StandingsAggregator::new(classifier, &settings.ladder).aggregate(&rounds).unwrap();
    store::save_standings(&settings.standings_path(), &StandingsDocument::new(&settings.season, standings)).unwrap();

    let back: StandingsDocument =
        serde_json::from_str(&fs::read_to_string(settings.standings_path()).unwrap()).unwrap();
    assert_eq!(back.standings.rounds_counted, vec![1]);
    assert_eq!(back.standings.entries[0].participant, "Anna");
    assert_eq!(back.standings.entries[0].total_points, 10);
    assert_eq!(back.standings.entries[1].total_points, 8);
}
