// src/core/net.rs
// Blocking HTTPS GET with linear-backoff retry.

use std::thread::sleep;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::{Settings, consts::MAX_RETRY};
use crate::error::{Error, Result};

pub fn build_client(settings: &Settings) -> Result<Client> {
    let client = Client::builder()
        .user_agent(settings.user_agent.as_str())
        .timeout(settings.timeout())
        .build()?;
    Ok(client)
}

/// Total tries for one request. Unvalidated settings are clamped too.
fn attempts(settings: &Settings) -> u32 {
    settings.retry.min(MAX_RETRY).saturating_add(1)
}

/// GET `url`, retrying `settings.retry` extra times on transport errors and
/// non-2xx statuses. Waits 1 s, 2 s, ... between attempts.
pub fn http_get(client: &Client, url: &str, settings: &Settings) -> Result<String> {
    let attempts = attempts(settings);
    let mut last_err = None;

    for attempt in 1..=attempts {
        match fetch_once(client, url) {
            Ok(body) => return Ok(body),
            Err(e) => {
                log::warn!("GET {url} failed (attempt {attempt}/{attempts}): {e}");
                last_err = Some(e);
                if attempt < attempts {
                    sleep(Duration::from_secs(u64::from(attempt)));
                }
            }
        }
    }
    Err(last_err.unwrap_or_else(|| Error::Status { url: s!(url), status: 0 }))
}

fn fetch_once(client: &Client, url: &str) -> Result<String> {
    let resp = client.get(url).send()?;
    let status = resp.status();
    if !status.is_success() {
        return Err(Error::Status { url: s!(url), status: status.as_u16() });
    }
    log::debug!("GET {url} -> {status}");
    Ok(resp.text()?)
}
