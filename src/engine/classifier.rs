// src/engine/classifier.rs
use crate::engine::types::{Round, RoundStatus};
use crate::error::{MalformedKind, MalformedRoundError};

/// Decides how far along a round is from its fixture results alone.
///
/// The expected fixture count is configuration (a Bundesliga Spieltag has 9),
/// never inferred from the page: a short fixture list means the scrape broke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundClassifier {
    expected_fixtures: usize,
}

impl RoundClassifier {
    pub fn new(expected_fixtures: usize) -> Self {
        Self { expected_fixtures }
    }

    pub fn expected_fixtures(&self) -> usize {
        self.expected_fixtures
    }

    pub fn classify(&self, round: &Round) -> Result<RoundStatus, MalformedRoundError> {
        let found = round.fixtures.len();
        if found != self.expected_fixtures {
            return Err(MalformedRoundError::new(
                round.number,
                MalformedKind::FixtureCount { expected: self.expected_fixtures, found },
            ));
        }

        let mut results_in = 0usize;
        for (index, fixture) in round.fixtures.iter().enumerate() {
            if fixture.is_partial() {
                return Err(MalformedRoundError::new(
                    round.number,
                    MalformedKind::PartialResult {
                        index,
                        home: fixture.participant_a.clone(),
                        away: fixture.participant_b.clone(),
                    },
                ));
            }
            if fixture.has_result() {
                results_in += 1;
            }
        }

        let status = match results_in {
            0 => RoundStatus::NotStarted,
            r if r == self.expected_fixtures => RoundStatus::Complete,
            _ => RoundStatus::InProgress,
        };
        log::debug!(
            "round {}: {results_in}/{} results -> {status}",
            round.number,
            self.expected_fixtures
        );
        Ok(status)
    }
}
