// src/engine/ladder.rs
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::consts::{DEFAULT_LADDER, MAX_LADDER_POINTS};
use crate::engine::types::Points;
use crate::error::LadderConfigurationError;

/// Rank → points. Index 0 is rank 1. Dense by construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LadderRepr", into = "Vec<Points>")]
pub struct Ladder(Vec<Points>);

/// Accepted config shapes: `[10, 8, 6]` or `{"1": 10, "2": 8, "3": 6}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum LadderRepr {
    List(Vec<Points>),
    // JSON object keys arrive as strings
    Ranks(BTreeMap<String, Points>),
}

impl TryFrom<LadderRepr> for Ladder {
    type Error = LadderConfigurationError;

    fn try_from(repr: LadderRepr) -> Result<Self, Self::Error> {
        match repr {
            LadderRepr::List(v) => Ladder::new(v),
            LadderRepr::Ranks(m) => {
                let mut ranks = BTreeMap::new();
                for (key, value) in m {
                    let rank = key
                        .trim()
                        .parse::<usize>()
                        .map_err(|_| LadderConfigurationError::BadRank(key.clone()))?;
                    ranks.insert(rank, value);
                }
                Ladder::from_ranks(&ranks)
            }
        }
    }
}

impl From<Ladder> for Vec<Points> {
    fn from(ladder: Ladder) -> Self {
        ladder.0
    }
}

impl Default for Ladder {
    fn default() -> Self {
        Self(DEFAULT_LADDER.to_vec())
    }
}

impl Ladder {
    pub fn new(points: Vec<Points>) -> Result<Self, LadderConfigurationError> {
        if points.is_empty() {
            return Err(LadderConfigurationError::Empty);
        }
        let allowed = -MAX_LADDER_POINTS..=MAX_LADDER_POINTS;
        if let Some((i, &value)) = points.iter().enumerate().find(|(_, v)| !allowed.contains(*v)) {
            return Err(LadderConfigurationError::ValueOutOfRange { rank: i + 1, value, max: MAX_LADDER_POINTS });
        }
        Ok(Self(points))
    }

    /// Build from explicit rank numbers. Every rank from 1 up to the highest
    /// one given must be present.
    pub fn from_ranks(ranks: &BTreeMap<usize, Points>) -> Result<Self, LadderConfigurationError> {
        if ranks.contains_key(&0) {
            return Err(LadderConfigurationError::RankZero);
        }
        let mut points = Vec::with_capacity(ranks.len());
        for (expected, (&rank, &value)) in (1..).zip(ranks.iter()) {
            if rank != expected {
                return Err(LadderConfigurationError::Gap(expected));
            }
            points.push(value);
        }
        Ladder::new(points)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Points] {
        &self.0
    }

    /// Points for a 1-based rank. Out of range is an error, never zero.
    pub fn points_for(&self, rank: usize) -> Result<Points, LadderConfigurationError> {
        rank.checked_sub(1)
            .and_then(|i| self.0.get(i).copied())
            .ok_or(LadderConfigurationError::RankOutOfRange { rank, ladder_len: self.0.len() })
    }

    /// The ladder must have exactly one value per participant of a round.
    pub fn check_fits(&self, round: u32, participants: usize) -> Result<(), LadderConfigurationError> {
        if self.0.len() != participants {
            return Err(LadderConfigurationError::LengthMismatch {
                round,
                ladder_len: self.0.len(),
                participants,
            });
        }
        Ok(())
    }
}
