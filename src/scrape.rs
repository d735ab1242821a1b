// src/scrape.rs
use std::thread;

use reqwest::blocking::Client;

use crate::{
    config::Settings,
    core::net,
    error::Result,
    progress::Progress,
    specs::kicktipp,
    store::RoundDocument,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundSelector {
    /// Whatever the season navigation links to.
    Discover,
    Ids(Vec<u32>),
}

fn resolve_rounds(client: &Client, settings: &Settings, sel: &RoundSelector) -> Result<Vec<u32>> {
    match sel {
        RoundSelector::Ids(v) => Ok(v.clone()),
        RoundSelector::Discover => {
            let html = net::http_get(client, &settings.overview_url(1), settings)?;
            Ok(kicktipp::discover_round_indices(&html))
        }
    }
}

/// Fetch, parse and classify the selected rounds, one request at a time.
/// Transport errors abort; a malformed round is returned without status.
pub fn collect_rounds(
    settings: &Settings,
    selector: &RoundSelector,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<RoundDocument>> {
    let client = net::build_client(settings)?;
    let classifier = settings.classifier();
    let rounds = resolve_rounds(&client, settings, selector)?;

    if let Some(p) = progress.as_deref_mut() {
        p.begin(rounds.len());
        p.log("Fetching rounds…");
    }
    log::info!("scraping {} rounds of season {}", rounds.len(), settings.season);

    let mut docs = Vec::with_capacity(rounds.len());
    for (i, &number) in rounds.iter().enumerate() {
        if i > 0 {
            thread::sleep(settings.sleep_between()); // be polite
        }
        let html = match net::http_get(&client, &settings.overview_url(number), settings) {
            Ok(html) => html,
            Err(e) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.log(&format!("Round {number}: {e}"));
                    p.finish();
                }
                return Err(e);
            }
        };

        let doc = RoundDocument::classified(&settings.season, kicktipp::parse_round(&html, number), &classifier);
        if let Some(p) = progress.as_deref_mut() {
            match doc.status {
                Some(status) => p.log(&format!("Round {number}: {status}")),
                None => p.log(&format!("Round {number}: malformed, kept without status")),
            }
            p.item_done(number);
        }
        docs.push(doc);
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(docs)
}
