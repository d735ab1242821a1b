// src/config/options.rs
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::consts::*;
use crate::engine::{Ladder, RoundClassifier};
use crate::error::{Error, Result};

/// Everything a run needs. Every field has a compiled default, so a config
/// file only has to name what it changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub group: String,
    pub tippsaison_id: u64,
    pub season: String,
    pub matches_per_round: usize,
    pub ladder: Ladder,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub retry: u32,
    pub sleep_between_ms: u64,
    pub data_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: s!(BASE_URL),
            group: s!(GROUP),
            tippsaison_id: TIPPSAISON_ID,
            season: s!(SEASON),
            matches_per_round: MATCHES_PER_ROUND,
            ladder: Ladder::default(),
            user_agent: s!(USER_AGENT),
            timeout_secs: TIMEOUT_SECS,
            retry: RETRY,
            sleep_between_ms: SLEEP_BETWEEN_MS,
            data_dir: PathBuf::from(DATA_DIR),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&text)?;
        log::debug!("settings loaded from {}", path.display());
        Ok(settings)
    }

    /// Explicit path must exist. Without one, `wurstliga.json` in the working
    /// directory is used if present, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let fallback = Path::new(CONFIG_FILE);
                if fallback.is_file() { Self::load(fallback) } else { Ok(Self::default()) }
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.matches_per_round == 0 {
            return Err(Error::Config(s!("matches_per_round must be at least 1")));
        }
        if self.ladder.is_empty() {
            return Err(Error::Config(s!("ladder is empty")));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config(s!("timeout_secs must be at least 1")));
        }
        if self.season.trim().is_empty() {
            return Err(Error::Config(s!("season is empty")));
        }
        if self.retry > MAX_RETRY {
            return Err(Error::Config(format!("retry must be at most {MAX_RETRY}")));
        }
        Ok(())
    }

    pub fn classifier(&self) -> RoundClassifier {
        RoundClassifier::new(self.matches_per_round)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn sleep_between(&self) -> Duration {
        Duration::from_millis(self.sleep_between_ms)
    }

    /// `https://www.kicktipp.de/wurstliga/tippuebersicht?tippsaisonId=..&spieltagIndex=N`
    pub fn overview_url(&self, round: u32) -> String {
        join!(
            self.base_url.trim_end_matches('/'),
            "/",
            self.group.trim_matches('/'),
            "/",
            OVERVIEW_PAGE,
            "?tippsaisonId=",
            &self.tippsaison_id.to_string(),
            "&spieltagIndex=",
            &round.to_string()
        )
    }

    pub fn season_dir(&self) -> PathBuf {
        self.data_dir.join(join!("season-", &self.season))
    }

    pub fn rounds_dir(&self) -> PathBuf {
        self.season_dir().join(ROUNDS_SUBDIR)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.season_dir().join(METADATA_FILE)
    }

    pub fn standings_path(&self) -> PathBuf {
        self.season_dir().join(STANDINGS_FILE)
    }
}
