// tests/season_e2e.rs
// Kicktipp pages in, season table out, through the public API only.

use wurstliga::config::Settings;
use wurstliga::engine::{RoundStatus, StandingsAggregator};
use wurstliga::error::AggregateError;
use wurstliga::specs::kicktipp::parse_round;

const TIPPERS: [&str; 8] = ["Anna", "Ben", "Cleo", "Dora", "Emil", "Frida", "Gero", "Hanne"];

/// A `tippuebersicht` page with 9 fixtures (the first `results` finished)
/// and one score row per tipper.
fn page(results: usize, points: [u32; 8]) -> String {
    let mut html = String::from(
        "<html><body><table class=\"tippuebersicht\"><thead><tr>\
         <th>Termin</th><th>Heim</th><th>Gast</th><th>Ergebnis</th></tr></thead><tbody>",
    );
    for i in 0..9 {
        let result = if i < results { format!("{}:{}", i % 3, 1) } else { String::from("-:-") };
        html.push_str(&format!(
            "<tr><td>2{i}.09.25 15:30</td><td>Heim {i}</td><td>Gast {i}</td><td>{result}</td></tr>"
        ));
    }
    html.push_str(
        "</tbody></table><table id=\"ranking\"><thead><tr>\
         <th>Pos</th><th>+/-</th><th>Name</th><th>P</th><th>B</th><th>S</th></tr></thead><tbody>",
    );
    for (name, p) in TIPPERS.iter().zip(points) {
        html.push_str(&format!("<tr><td></td><td></td><td>{name}</td><td>{p}</td><td>0</td><td>0</td></tr>"));
    }
    html.push_str("</tbody></table></body></html>");
    html
}

#[test]
fn complete_rounds_are_ranked_and_summed() {
    let settings = Settings::default();
    let classifier = settings.classifier();

    let rounds = vec![
        parse_round(&page(9, [12, 12, 9, 8, 7, 6, 5, 0]), 1),
        parse_round(&page(9, [3, 10, 9, 8, 7, 6, 5, 4]), 2),
        parse_round(&page(4, [30, 0, 0, 0, 0, 0, 0, 0]), 3),
        parse_round(&page(0, [0; 8]), 4),
    ];
    assert_eq!(classifier.classify(&rounds[0]), Ok(RoundStatus::Complete));
    assert_eq!(classifier.classify(&rounds[2]), Ok(RoundStatus::InProgress));
    assert_eq!(classifier.classify(&rounds[3]), Ok(RoundStatus::NotStarted));

    let standings = StandingsAggregator::new(classifier, &settings.ladder).aggregate(&rounds).unwrap();
    assert_eq!(standings.rounds_counted, vec![1, 2]);

    // Round 1: Anna and Ben share rank 1 (10 each), Cleo is 3rd (6) ...
    // Round 2: Ben 10, Cleo 8, ..., Anna last (1)
    let ben = standings.entry("Ben").unwrap();
    assert_eq!(ben.total_points, 20);
    assert_eq!(ben.round_wins, 2);
    assert_eq!(ben.rounds_counted, 2);
    assert_eq!(standings.entry("Anna").unwrap().total_points, 11);
    assert_eq!(standings.entry("Cleo").unwrap().total_points, 14);
    let hanne = standings.entry("Hanne").unwrap();
    assert_eq!(hanne.total_points, 1 + 2);
    assert_eq!(hanne.zero_score_rounds, 1);

    assert_eq!(standings.entries[0].participant, "Ben");
    assert_eq!(standings.entries[1].participant, "Cleo");

    let again = StandingsAggregator::new(classifier, &settings.ladder).aggregate(&rounds).unwrap();
    assert_eq!(standings, again);
}

#[test]
fn a_broken_page_fails_the_whole_season() {
    let settings = Settings::default();
    let mut broken = page(9, [1, 2, 3, 4, 5, 6, 7, 8]);
    // lose one fixture row
    let cut = broken.find("<tr><td>28.09.25").unwrap();
    let end = broken[cut..].find("</tr>").unwrap() + cut + "</tr>".len();
    broken.replace_range(cut..end, "");

    let rounds = vec![parse_round(&page(9, [8, 7, 6, 5, 4, 3, 2, 1]), 1), parse_round(&broken, 2)];
    let err = StandingsAggregator::new(settings.classifier(), &settings.ladder)
        .aggregate(&rounds)
        .unwrap_err();
    assert!(matches!(err, AggregateError::MalformedRound(ref e) if e.round == 2));
}

#[test]
fn ladder_must_cover_every_tipper() {
    let mut settings = Settings::default();
    settings.ladder = wurstliga::engine::Ladder::new(vec![10, 8, 6]).unwrap();
    let rounds = vec![parse_round(&page(9, [8, 7, 6, 5, 4, 3, 2, 1]), 1)];
    let err = StandingsAggregator::new(settings.classifier(), &settings.ladder)
        .aggregate(&rounds)
        .unwrap_err();
    assert!(matches!(err, AggregateError::Ladder(_)));
}
