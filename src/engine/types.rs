// src/engine/types.rs
use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{MalformedKind, MalformedRoundError};

/// Ladder award / season total.
pub type Points = i64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    NotStarted,
    InProgress,
    Complete,
}

impl RoundStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundStatus::NotStarted => "not_started",
            RoundStatus::InProgress => "in_progress",
            RoundStatus::Complete => "complete",
        }
    }
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scheduled match. `participant_a` is the home side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub participant_a: String,
    pub participant_b: String,
    #[serde(default)]
    pub result_a: Option<u32>,
    #[serde(default)]
    pub result_b: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kickoff: Option<NaiveDateTime>,
}

impl Fixture {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            participant_a: a.into(),
            participant_b: b.into(),
            result_a: None,
            result_b: None,
            kickoff: None,
        }
    }

    pub fn with_result(mut self, a: u32, b: u32) -> Self {
        self.result_a = Some(a);
        self.result_b = Some(b);
        self
    }

    /// Both scores, or nothing. A half-filled pair is reported as `None` here;
    /// the classifier is the one that rejects it.
    pub fn result(&self) -> Option<(u32, u32)> {
        match (self.result_a, self.result_b) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        }
    }

    pub fn has_result(&self) -> bool {
        self.result().is_some()
    }

    pub fn is_partial(&self) -> bool {
        self.result_a.is_some() != self.result_b.is_some()
    }
}

/// A participant's raw points for one round, as scraped from the score table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub participant: String,
    pub points: u32,
}

impl Score {
    pub fn new(participant: impl Into<String>, points: u32) -> Self {
        Self { participant: participant.into(), points }
    }
}

/// One Spieltag. Status is never stored here; ask a `RoundClassifier`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    #[serde(rename = "round_number")]
    pub number: u32,
    pub fixtures: Vec<Fixture>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scores: Vec<Score>,
}

/// The ranked unit of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tally<'a> {
    pub participant: &'a str,
    pub score: u32,
    /// Opponent's score; only known when the tally comes from a fixture.
    pub conceded: Option<u32>,
}

impl Round {
    pub fn new(number: u32, fixtures: Vec<Fixture>) -> Self {
        Self { number, fixtures, scores: Vec::new() }
    }

    pub fn with_scores(mut self, scores: Vec<Score>) -> Self {
        self.scores = scores;
        self
    }

    pub fn results_in(&self) -> usize {
        self.fixtures.iter().filter(|f| f.has_result()).count()
    }

    /// True when the round is ranked from its score table rather than from
    /// the fixture sides.
    pub fn ranks_by_scores(&self) -> bool {
        !self.scores.is_empty()
    }

    /// Every participant the round mentions, whatever its status.
    pub fn participants(&self) -> Vec<&str> {
        if self.ranks_by_scores() {
            self.scores.iter().map(|s| s.participant.as_str()).collect()
        } else {
            self.fixtures
                .iter()
                .flat_map(|f| [f.participant_a.as_str(), f.participant_b.as_str()])
                .collect()
        }
    }

    /// Rankable tallies. Fixtures without a result contribute nothing, so
    /// this is only meaningful for a complete round.
    pub fn tallies(&self) -> Vec<Tally<'_>> {
        if self.ranks_by_scores() {
            return self
                .scores
                .iter()
                .map(|s| Tally { participant: &s.participant, score: s.points, conceded: None })
                .collect();
        }

        let mut out = Vec::with_capacity(self.fixtures.len() * 2);
        for f in &self.fixtures {
            if let Some((a, b)) = f.result() {
                out.push(Tally { participant: &f.participant_a, score: a, conceded: Some(b) });
                out.push(Tally { participant: &f.participant_b, score: b, conceded: Some(a) });
            }
        }
        out
    }

    /// A participant may only appear once per round.
    pub fn check_participants(&self) -> Result<(), MalformedRoundError> {
        let mut seen = HashSet::new();
        for p in self.participants() {
            if !seen.insert(p) {
                return Err(MalformedRoundError::new(
                    self.number,
                    MalformedKind::DuplicateParticipant(s!(p)),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_strings_match_the_wire_format() {
        assert_eq!(RoundStatus::NotStarted.to_string(), "not_started");
        assert_eq!(RoundStatus::InProgress.to_string(), "in_progress");
        assert_eq!(RoundStatus::Complete.to_string(), "complete");
        assert_eq!(serde_json::to_string(&RoundStatus::InProgress).unwrap(), "\"in_progress\"");
    }

    #[test]
    fn fixture_sides_become_tallies_with_conceded() {
        let round = Round::new(
            1,
            vec![Fixture::new("Bayern", "Bremen").with_result(3, 1), Fixture::new("Köln", "Mainz")],
        );
        let t = round.tallies();
        assert_eq!(t.len(), 2);
        assert_eq!(t[0], Tally { participant: "Bayern", score: 3, conceded: Some(1) });
        assert_eq!(t[1], Tally { participant: "Bremen", score: 1, conceded: Some(3) });
        assert_eq!(round.participants(), vec!["Bayern", "Bremen", "Köln", "Mainz"]);
    }

    #[test]
    fn score_table_takes_precedence_over_fixtures() {
        let round = Round::new(2, vec![Fixture::new("A", "B").with_result(1, 0)])
            .with_scores(vec![Score::new("Anna", 12), Score::new("Ben", 7)]);
        assert!(round.ranks_by_scores());
        assert_eq!(round.participants(), vec!["Anna", "Ben"]);
        let t = round.tallies();
        assert_eq!(t[1], Tally { participant: "Ben", score: 7, conceded: None });
    }

    #[test]
    fn duplicate_participant_is_malformed() {
        let round = Round::new(4, vec![])
            .with_scores(vec![Score::new("Anna", 3), Score::new("Anna", 5)]);
        let err = round.check_participants().unwrap_err();
        assert_eq!(err.round, 4);
        assert_eq!(err.kind, MalformedKind::DuplicateParticipant(s!("Anna")));
    }

    #[test]
    fn missing_results_deserialize_as_none() {
        let f: Fixture = serde_json::from_str(r#"{"participant_a":"A","participant_b":"B"}"#).unwrap();
        assert!(!f.has_result());
        assert!(!f.is_partial());
        assert_eq!(f.kickoff, None);
    }
}
