// src/specs/mod.rs
//! # Page specs
//!
//! Where the ground truth lives in the Kicktipp HTML, and how to get it out
//! robustly. One spec per page kind.
//!
//! ## What lives here
//! - **Pure HTML parsing**: `&str` in, engine types out. No network, no disk.
//! - **Selector choice & fallbacks**: tables are found by their header texts,
//!   not by position or CSS class; column indices fall back by position when
//!   a header is renamed.
//! - **Tolerant extraction** using `core::html` helpers (case-insensitive
//!   element scanning, tag stripping, entity/whitespace normalization).
//!
//! ## What does **not** live here
//! - Fetching and pacing (`scrape`), persistence (`store`), and deciding
//!   what a round's status is (`engine::RoundClassifier`).
//!
//! ## Typical call chain
//! ```text
//! cli → scrape::collect_rounds → net::http_get
//!                              ↘ specs::kicktipp::parse_round
//!                              ↘ RoundClassifier::classify
//!       store::save_round (outside of specs)
//! ```
//!
//! ## Testing notes
//! Specs are tested offline against inline HTML snippets shaped like the
//! live page, including the noise (`<br>` inside cells, `&nbsp;`,
//! `endOfBlock` spacer rows).
pub mod kicktipp;
