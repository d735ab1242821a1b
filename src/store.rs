// src/store.rs
//! On-disk layout, one directory per season:
//!
//! ```text
//! <data_dir>/season-<season>/
//!     rounds/01.json .. 34.json
//!     metadata.json
//!     standings.json
//! ```
//!
//! Every write overwrites. Status in a round file is informational only; it
//! is dropped on load and recomputed by the classifier.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::engine::{Round, RoundClassifier, RoundStatus, SeasonStandings};
use crate::error::Result;
use crate::file::{ensure_directory, write_json};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundDocument {
    pub season: String,
    /// `None` when the round did not classify (malformed).
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub status: Option<RoundStatus>,
    #[serde(flatten)]
    pub round: Round,
}

impl RoundDocument {
    /// Classify `round` and wrap it for storage. A malformed round is kept
    /// (without status) so it can be inspected.
    pub fn classified(season: &str, round: Round, classifier: &RoundClassifier) -> Self {
        let status = match classifier.classify(&round) {
            Ok(s) => Some(s),
            Err(e) => {
                log::warn!("{e}");
                None
            }
        };
        Self { season: s!(season), status, round }
    }

    pub fn file_name(&self) -> String {
        format!("{:02}.json", self.round.number)
    }
}

pub fn save_round(dir: &Path, doc: &RoundDocument) -> Result<PathBuf> {
    let path = dir.join(doc.file_name());
    write_json(&path, doc)?;
    Ok(path)
}

/// Every `*.json` in `dir`, in file-name order. A missing directory is an
/// empty season.
pub fn load_documents(dir: &Path) -> Result<Vec<RoundDocument>> {
    if !dir.exists() {
        log::info!("no rounds at {}", dir.display());
        return Ok(Vec::new());
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    paths.sort();

    let mut docs = Vec::with_capacity(paths.len());
    for path in paths {
        let text = fs::read_to_string(&path)?;
        let doc: RoundDocument = serde_json::from_str(&text)?;
        log::debug!("loaded {}", path.display());
        docs.push(doc);
    }
    Ok(docs)
}

pub fn load_rounds(dir: &Path) -> Result<Vec<Round>> {
    Ok(load_documents(dir)?.into_iter().map(|d| d.round).collect())
}

/* ---------------- metadata ---------------- */

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub status: Option<RoundStatus>,
    pub results: usize,
    pub participants: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub season: String,
    pub updated_at: String,
    pub rounds: BTreeMap<u32, RoundSummary>,
}

impl Metadata {
    pub fn from_documents(season: &str, docs: &[RoundDocument]) -> Self {
        let rounds = docs
            .iter()
            .map(|d| {
                let summary = RoundSummary {
                    status: d.status,
                    results: d.round.results_in(),
                    participants: d.round.participants().len(),
                };
                (d.round.number, summary)
            })
            .collect();
        Self { season: s!(season), updated_at: now(), rounds }
    }
}

pub fn save_metadata(path: &Path, meta: &Metadata) -> Result<()> {
    write_json(path, meta)
}

/* ---------------- standings ---------------- */

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsDocument {
    pub season: String,
    pub updated_at: String,
    #[serde(flatten)]
    pub standings: SeasonStandings,
}

impl StandingsDocument {
    pub fn new(season: &str, standings: SeasonStandings) -> Self {
        Self { season: s!(season), updated_at: now(), standings }
    }
}

pub fn save_standings(path: &Path, doc: &StandingsDocument) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_directory(parent)?;
    }
    write_json(path, doc)
}

fn now() -> String {
    Local::now().to_rfc3339()
}
