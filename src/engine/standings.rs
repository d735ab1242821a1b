// src/engine/standings.rs
//! Season standings: complete rounds → per-round ranks → ladder points →
//! season table.
//!
//! ## Ranking rules
//! - Within a round, higher raw score ranks better. Equal scores share a
//!   rank and the ladder value of the best position of their block
//!   (competition ranking: 1, 1, 3, 4).
//! - Across the season, more points ranks better. Equal totals fall back to
//!   fewer conceded (only when every counted entry has that figure), then to
//!   the higher raw score sum, then to the participant name.
//! - A season has one kind of participant. Once any round carries a score
//!   table, fixture sides of rounds without one are not participants.
//!
//! The table is rebuilt from scratch on every call; nothing is carried over
//! between runs.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::engine::classifier::RoundClassifier;
use crate::engine::ladder::Ladder;
use crate::engine::types::{Points, Round, RoundStatus, Tally};
use crate::error::{AggregateError, LadderConfigurationError, MalformedKind, MalformedRoundError};

/// One participant's result within one complete round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundPlacing {
    pub participant: String,
    pub score: u32,
    pub rank: usize,
    pub points: Points,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conceded: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRanking {
    pub round_number: u32,
    pub placings: Vec<RoundPlacing>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonStandingsEntry {
    pub participant: String,
    pub total_points: Points,
    pub rounds_counted: u32,
    /// Sum of raw round scores
    pub raw_points: u64,
    /// Rounds finished at rank 1 (shared ranks included)
    pub round_wins: u32,
    /// Rounds with a raw score of 0
    pub zero_score_rounds: u32,
    /// Rounds that awarded 0 ladder points
    pub pointless_rounds: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conceded: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonStandings {
    /// Round numbers that contributed, ascending
    pub rounds_counted: Vec<u32>,
    pub entries: Vec<SeasonStandingsEntry>,
    pub rounds: Vec<RoundRanking>,
}

impl SeasonStandings {
    pub fn entry(&self, participant: &str) -> Option<&SeasonStandingsEntry> {
        self.entries.iter().find(|e| e.participant == participant)
    }

    /// Flat table for CSV/TSV export and terminal output.
    pub fn table(&self) -> (Vec<String>, Vec<Vec<String>>) {
        let headers = ["Pos", "Name", "Pts", "Rounds", "Raw", "Wins", "Zero", "Blank"]
            .into_iter()
            .map(String::from)
            .collect();
        let rows = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| {
                vec![
                    (i + 1).to_string(),
                    e.participant.clone(),
                    e.total_points.to_string(),
                    e.rounds_counted.to_string(),
                    e.raw_points.to_string(),
                    e.round_wins.to_string(),
                    e.zero_score_rounds.to_string(),
                    e.pointless_rounds.to_string(),
                ]
            })
            .collect();
        (headers, rows)
    }
}

/// Running totals for one participant.
#[derive(Default)]
struct Accum {
    total_points: Points,
    rounds_counted: u32,
    raw_points: u64,
    round_wins: u32,
    zero_score_rounds: u32,
    pointless_rounds: u32,
    conceded: u64,
    conceded_missing: bool,
}

impl Accum {
    fn add(&mut self, placing: &RoundPlacing) {
        self.total_points += placing.points;
        self.rounds_counted += 1;
        self.raw_points += u64::from(placing.score);
        if placing.rank == 1 {
            self.round_wins += 1;
        }
        if placing.score == 0 {
            self.zero_score_rounds += 1;
        }
        if placing.points == 0 {
            self.pointless_rounds += 1;
        }
        match placing.conceded {
            Some(c) => self.conceded += u64::from(c),
            None => self.conceded_missing = true,
        }
    }

    fn into_entry(self, participant: &str) -> SeasonStandingsEntry {
        let conceded = (self.rounds_counted > 0 && !self.conceded_missing).then_some(self.conceded);
        SeasonStandingsEntry {
            participant: s!(participant),
            total_points: self.total_points,
            rounds_counted: self.rounds_counted,
            raw_points: self.raw_points,
            round_wins: self.round_wins,
            zero_score_rounds: self.zero_score_rounds,
            pointless_rounds: self.pointless_rounds,
            conceded,
        }
    }
}

/// Turns classified rounds into a season table.
#[derive(Clone, Copy, Debug)]
pub struct StandingsAggregator<'a> {
    classifier: RoundClassifier,
    ladder: &'a Ladder,
}

impl<'a> StandingsAggregator<'a> {
    pub fn new(classifier: RoundClassifier, ladder: &'a Ladder) -> Self {
        Self { classifier, ladder }
    }

    /// All-or-nothing: one malformed round or an ill-fitting ladder fails the
    /// whole run.
    pub fn aggregate(&self, rounds: &[Round]) -> Result<SeasonStandings, AggregateError> {
        let mut numbers = BTreeSet::new();
        let mut totals: BTreeMap<&str, Accum> = BTreeMap::new();
        let mut complete: Vec<&Round> = Vec::new();
        let by_scores = rounds.iter().any(Round::ranks_by_scores);

        for round in rounds {
            if !numbers.insert(round.number) {
                return Err(MalformedRoundError::new(round.number, MalformedKind::DuplicateRound).into());
            }
            let status = self.classifier.classify(round)?;
            round.check_participants()?;

            if by_scores && !round.ranks_by_scores() {
                if status == RoundStatus::Complete {
                    return Err(MalformedRoundError::new(round.number, MalformedKind::MissingScores).into());
                }
                log::debug!("round {}: no score table yet, fixture sides ignored", round.number);
                continue;
            }
            for p in round.participants() {
                totals.entry(p).or_default();
            }
            if status == RoundStatus::Complete {
                complete.push(round);
            }
        }
        complete.sort_by_key(|r| r.number);

        let mut rankings = Vec::with_capacity(complete.len());
        for round in &complete {
            let ranking = rank_round(round, self.ladder)?;
            for placing in &ranking.placings {
                // participants() already registered every tally's name
                if let Some(acc) = totals.get_mut(placing.participant.as_str()) {
                    acc.add(placing);
                }
            }
            rankings.push(ranking);
        }

        let mut entries: Vec<SeasonStandingsEntry> =
            totals.into_iter().map(|(name, acc)| acc.into_entry(name)).collect();
        sort_season(&mut entries);

        log::debug!(
            "standings: {} participants over {} complete of {} rounds",
            entries.len(),
            complete.len(),
            rounds.len()
        );

        Ok(SeasonStandings {
            rounds_counted: complete.iter().map(|r| r.number).collect(),
            entries,
            rounds: rankings,
        })
    }
}

/// Rank one complete round and look up each rank on the ladder.
pub fn rank_round(round: &Round, ladder: &Ladder) -> Result<RoundRanking, LadderConfigurationError> {
    let mut tallies: Vec<Tally> = round.tallies();
    ladder.check_fits(round.number, tallies.len())?;

    // Name order inside a tie only fixes the listing order; points are shared
    tallies.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.participant.cmp(b.participant)));

    let mut placings = Vec::with_capacity(tallies.len());
    let mut rank = 0usize;
    let mut prev_score: Option<u32> = None;

    for (i, t) in tallies.iter().enumerate() {
        if prev_score != Some(t.score) {
            rank = i + 1;
            prev_score = Some(t.score);
        }
        placings.push(RoundPlacing {
            participant: s!(t.participant),
            score: t.score,
            rank,
            points: ladder.points_for(rank)?,
            conceded: t.conceded,
        });
    }

    Ok(RoundRanking { round_number: round.number, placings })
}

/* ---------------- season ordering ---------------- */

fn compare_points(a: &SeasonStandingsEntry, b: &SeasonStandingsEntry) -> Ordering {
    b.total_points.cmp(&a.total_points)
}

/// No counted rounds means nothing conceded.
fn compare_conceded(a: &SeasonStandingsEntry, b: &SeasonStandingsEntry) -> Ordering {
    a.conceded.unwrap_or(0).cmp(&b.conceded.unwrap_or(0))
}

fn compare_raw_points(a: &SeasonStandingsEntry, b: &SeasonStandingsEntry) -> Ordering {
    b.raw_points.cmp(&a.raw_points)
}

fn compare_name(a: &SeasonStandingsEntry, b: &SeasonStandingsEntry) -> Ordering {
    a.participant.cmp(&b.participant)
}

fn sort_season(entries: &mut [SeasonStandingsEntry]) {
    // Mixed availability would make the order intransitive
    let by_conceded = entries
        .iter()
        .filter(|e| e.rounds_counted > 0)
        .all(|e| e.conceded.is_some());

    entries.sort_by(|a, b| {
        compare_points(a, b)
            .then_with(|| if by_conceded { compare_conceded(a, b) } else { Ordering::Equal })
            .then_with(|| compare_raw_points(a, b))
            .then_with(|| compare_name(a, b))
    });
}
