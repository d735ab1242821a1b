// src/error.rs
use std::io;

use thiserror::Error;

use crate::engine::types::Points;

/// A round whose scraped data cannot be trusted. Fatal to the round and to
/// any aggregation that includes it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed round {round}: {kind}")]
pub struct MalformedRoundError {
    pub round: u32,
    pub kind: MalformedKind,
}

impl MalformedRoundError {
    pub fn new(round: u32, kind: MalformedKind) -> Self {
        Self { round, kind }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedKind {
    #[error("expected {expected} fixtures, found {found}")]
    FixtureCount { expected: usize, found: usize },

    #[error("fixture {index} ({home} vs {away}) has only one of two scores")]
    PartialResult { index: usize, home: String, away: String },

    #[error("participant {0:?} appears more than once")]
    DuplicateParticipant(String),

    #[error("round number appears more than once")]
    DuplicateRound,

    #[error("complete round has no score table while other rounds do")]
    MissingScores,
}

/// Ladder does not cover the ranks it is asked for.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LadderConfigurationError {
    #[error("ladder is empty")]
    Empty,

    #[error("ladder rank {0:?} is not a number")]
    BadRank(String),

    #[error("ladder ranks start at 1, found rank 0")]
    RankZero,

    #[error("ladder has no value for rank {0}")]
    Gap(usize),

    #[error("round {round}: ladder has {ladder_len} ranks but the round has {participants} participants")]
    LengthMismatch { round: u32, ladder_len: usize, participants: usize },

    #[error("rank {rank} is beyond the ladder ({ladder_len} ranks)")]
    RankOutOfRange { rank: usize, ladder_len: usize },

    #[error("ladder value {value} for rank {rank} is outside ±{max}")]
    ValueOutOfRange { rank: usize, value: Points, max: Points },
}

/// Why a season table could not be produced. Never partial.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    #[error(transparent)]
    MalformedRound(#[from] MalformedRoundError),

    #[error(transparent)]
    Ladder(#[from] LadderConfigurationError),
}

/// Crate-level error for everything around the core (net, store, config).
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    MalformedRound(#[from] MalformedRoundError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

pub type Result<T> = std::result::Result<T, Error>;
