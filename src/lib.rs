// src/lib.rs
//! Kicktipp scraper and Wurstliga season standings.
//!
//! The pure core lives in [`engine`]: round classification and the season
//! aggregator. Everything else feeds it (page specs, net, store) or reports
//! on it (cli).

#[macro_use]
pub mod macros;

pub mod config;
pub mod core;
pub mod csv;
pub mod engine;
pub mod error;
pub mod file;
pub mod log;
pub mod progress;
pub mod scrape;
pub mod specs;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Error, Result};
