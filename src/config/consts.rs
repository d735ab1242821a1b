// src/config/consts.rs
use crate::engine::types::Points;

// Net config
pub const BASE_URL: &str = "https://www.kicktipp.de";
pub const GROUP: &str = "wurstliga";
pub const OVERVIEW_PAGE: &str = "tippuebersicht";
pub const TIPPSAISON_ID: u64 = 3944954;
pub const USER_AGENT: &str = "wurstliga-scraper/1.0";
pub const TIMEOUT_SECS: u64 = 30;
pub const RETRY: u32 = 2;
pub const MAX_RETRY: u32 = 10;
pub const SLEEP_BETWEEN_MS: u64 = 1_000; // be polite

// Season
pub const SEASON: &str = "2025-26";
pub const MATCHES_PER_ROUND: usize = 9;
/// Bundesliga has 34 Spieltage; used when discovery finds none
pub const FALLBACK_ROUNDS: u32 = 34;
pub const DEFAULT_LADDER: [Points; 8] = [10, 8, 6, 5, 4, 3, 2, 1];
/// Largest magnitude a ladder value may have; keeps season sums far from overflow
pub const MAX_LADDER_POINTS: Points = 1_000_000;

// Local store
pub const DATA_DIR: &str = "data";
pub const ROUNDS_SUBDIR: &str = "rounds";
pub const METADATA_FILE: &str = "metadata.json";
pub const STANDINGS_FILE: &str = "standings.json";
pub const CONFIG_FILE: &str = "wurstliga.json";
pub const LOG_FILE: &str = ".store/debug.log";
