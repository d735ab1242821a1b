// src/specs/kicktipp.rs
//! Kicktipp `tippuebersicht` page: one Spieltag per page.
//!
//! Two tables matter:
//! - the fixture table, recognised by its `Termin | Heim | Gast | Ergebnis`
//!   headers; one body row per match, result as `a:b` once it is in;
//! - the score table, recognised by a `Name` header and a `P` header; one
//!   row per tipper with their Kicktipp points for the Spieltag.
//!
//! Parsing is pure (`&str` in, values out). Fetching lives in `scrape`.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;

use crate::config::consts::FALLBACK_ROUNDS;
use crate::core::html::{attr_value, cell_text, elements_ci, open_tags_ci};
use crate::engine::types::{Fixture, Round, Score};

const FIXTURE_HEADERS: [&str; 4] = ["Termin", "Heim", "Gast", "Ergebnis"];
const KICKOFF_FORMAT: &str = "%d.%m.%y %H:%M";
const ROUND_PARAM: &str = "spieltagIndex";

/// Parse one Spieltag page into a `Round`. Status is not decided here.
pub fn parse_round(html: &str, number: u32) -> Round {
    let fixtures = parse_fixtures(html);
    let scores = parse_scores(html);
    log::debug!(
        "round {number}: parsed {} fixtures, {} scores",
        fixtures.len(),
        scores.len()
    );
    Round::new(number, fixtures).with_scores(scores)
}

/// Every `spieltagIndex=N` (N > 0) linked from the page, ascending. Falls
/// back to a full Bundesliga season when the navigation is missing.
pub fn discover_round_indices(html: &str) -> Vec<u32> {
    let mut found = BTreeSet::new();
    for a in open_tags_ci(html, "a") {
        let Some(href) = attr_value(a, "href") else { continue };
        if let Some(n) = query_param(&href, ROUND_PARAM).and_then(|v| v.trim().parse::<u32>().ok()) {
            if n > 0 {
                found.insert(n);
            }
        }
    }

    if found.is_empty() {
        log::info!("no {ROUND_PARAM} links found; assuming rounds 1..={FALLBACK_ROUNDS}");
        return (1..=FALLBACK_ROUNDS).collect();
    }
    found.into_iter().collect()
}

fn query_param<'a>(href: &'a str, key: &str) -> Option<&'a str> {
    let (_, query) = href.split_once('?')?;
    let query = query.split('#').next().unwrap_or(query);
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

/* ---------- fixture table ---------- */

pub fn parse_fixtures(html: &str) -> Vec<Fixture> {
    let Some(table) = elements_ci(html, "table").into_iter().find(|t| {
        let headers = header_texts(t);
        FIXTURE_HEADERS.iter().all(|h| headers.iter().any(|x| x == h))
    }) else {
        log::debug!("fixture table not found");
        return Vec::new();
    };

    let mut out = Vec::new();
    for tr in elements_ci(body_of(table), "tr") {
        let cells = row_cells(tr);
        if cells.len() < 4 {
            continue;
        }
        let mut fixture = Fixture::new(cells[1].as_str(), cells[2].as_str());
        if let Some((a, b)) = parse_result(&cells[3]) {
            fixture = fixture.with_result(a, b);
        }
        fixture.kickoff = parse_kickoff(&cells[0]);
        out.push(fixture);
    }
    out
}

/// `"2:0"` → `(2, 0)`. Anything else (`"-:-"`, blank, `"2:0 n.V."`) is no result.
pub fn parse_result(s: &str) -> Option<(u32, u32)> {
    let (a, b) = s.trim().split_once(':')?;
    let a = a.trim();
    let b = b.trim();
    if a.is_empty() || b.is_empty() || !a.chars().chain(b.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some((a.parse().ok()?, b.parse().ok()?))
}

/// First `DD.MM.YY HH:MM` pair in a Termin cell.
pub fn parse_kickoff(s: &str) -> Option<NaiveDateTime> {
    let tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.windows(2).find_map(|w| {
        let candidate = join!(w[0], " ", w[1]);
        NaiveDateTime::parse_from_str(&candidate, KICKOFF_FORMAT).ok()
    })
}

/* ---------- score table ---------- */

pub fn parse_scores(html: &str) -> Vec<Score> {
    let Some((table, headers)) = elements_ci(html, "table").into_iter().find_map(|t| {
        let headers = header_texts(t);
        let joined = headers.join(" ");
        (joined.contains("Name") && joined.contains('P')).then_some((t, headers))
    }) else {
        log::debug!("score table not found");
        return Vec::new();
    };

    // Usually `Pos | +/- | Name | ...`
    let name_idx = headers
        .iter()
        .position(|h| h == "Name")
        .unwrap_or(if headers.len() > 2 { 2 } else { 0 });
    // Per-match columns come first; the round total is the last `P`
    let points_idx = headers
        .iter()
        .rposition(|h| h == "P")
        .unwrap_or(headers.len().saturating_sub(3));

    let mut out = Vec::new();
    for tr in elements_ci(body_of(table), "tr") {
        let cells = row_cells(tr);
        if cells.len() <= name_idx.max(points_idx) {
            continue;
        }
        let name = cells[name_idx].trim();
        if name.is_empty() || name.starts_with("endOfBlock") {
            continue;
        }
        let raw = cells[points_idx].trim();
        let points = raw.parse::<u32>().unwrap_or_else(|_| {
            log::debug!("{name}: points {raw:?} not a number, counting 0");
            0
        });
        out.push(Score::new(name, points));
    }
    out
}

/* ---------- helpers ---------- */

fn header_texts(table: &str) -> Vec<String> {
    elements_ci(table, "th").into_iter().map(cell_text).collect()
}

fn body_of(table: &str) -> &str {
    elements_ci(table, "tbody").into_iter().next().unwrap_or(table)
}

fn row_cells(tr: &str) -> Vec<String> {
    elements_ci(tr, "td").into_iter().map(cell_text).collect()
}
