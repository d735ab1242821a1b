// src/engine/mod.rs
//! Pure core: no I/O, no shared state. Everything in here is a function of
//! its arguments.
pub mod classifier;
pub mod ladder;
pub mod standings;
pub mod types;

pub use classifier::RoundClassifier;
pub use ladder::Ladder;
pub use standings::{RoundPlacing, RoundRanking, SeasonStandings, SeasonStandingsEntry, StandingsAggregator};
pub use types::{Fixture, Points, Round, RoundStatus, Score, Tally};
