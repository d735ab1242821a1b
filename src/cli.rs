// src/cli.rs
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result, bail, eyre};
use ::log::LevelFilter;

use crate::config::{Settings, consts::LOG_FILE};
use crate::csv::rows_to_string;
use crate::engine::StandingsAggregator;
use crate::file::{resolve_single_out_path, write_delimited};
use crate::progress::Progress;
use crate::scrape::{self, RoundSelector};
use crate::store::{self, Metadata, RoundDocument, StandingsDocument};

#[derive(Parser, Debug)]
#[command(name = "wurstliga", version)]
#[command(about = "Scrape Kicktipp rounds and compute the Wurstliga season table", long_about = None)]
pub struct Cli {
    /// Settings file (JSON). Defaults to ./wurstliga.json when present
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Root of the local round store
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Season label, e.g. 2025-26
    #[arg(long, global = true)]
    season: Option<String>,

    /// Debug-level logging to the log file
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch rounds, classify them and store them locally
    Scrape {
        /// Rounds to fetch, e.g. `1-5,9`. Default: every round the site lists
        #[arg(long)]
        rounds: Option<String>,

        /// Skip recomputing the season table afterwards
        #[arg(long)]
        no_standings: bool,
    },

    /// Compute the season table from stored rounds
    Standings {
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,

        /// Output file or directory (trailing slash). Default: stdout
        #[arg(short, long)]
        out: Option<String>,
    },

    /// Show every stored round's status
    Status,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
    Csv,
    Tsv,
}

impl Format {
    fn ext(&self) -> &'static str {
        match self {
            Format::Table => "txt",
            Format::Json => "json",
            Format::Csv => "csv",
            Format::Tsv => "tsv",
        }
    }
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::load_or_default(self.config.as_deref())?;
        if let Some(dir) = &self.data_dir {
            settings.data_dir = dir.clone();
        }
        if let Some(season) = &self.season {
            settings.season = season.clone();
        }
        settings.validate()?;
        Ok(settings)
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose > 0 { LevelFilter::Debug } else { LevelFilter::Info };
    if let Err(e) = crate::log::init(LOG_FILE, level) {
        eprintln!("Warning: file logging disabled: {e}");
    }

    let settings = cli.settings()?;
    ::log::info!("season {} in {}", settings.season, settings.season_dir().display());

    match cli.command {
        Command::Scrape { rounds, no_standings } => {
            let selector = match rounds {
                Some(list) => RoundSelector::Ids(parse_ids_list(&list)?),
                None => RoundSelector::Discover,
            };
            run_scrape(&settings, &selector)?;
            if !no_standings {
                let doc = compute_standings(&settings)?;
                print!("{}", render_table(&doc));
            }
        }
        Command::Standings { format, out } => {
            let doc = compute_standings(&settings)?;
            emit_standings(&doc, format, out.as_deref())?;
        }
        Command::Status => print_status(&settings)?,
    }
    Ok(())
}

fn run_scrape(settings: &Settings, selector: &RoundSelector) -> Result<()> {
    let mut progress = ConsoleProgress::default();
    let docs = scrape::collect_rounds(settings, selector, Some(&mut progress))?;

    let dir = settings.rounds_dir();
    for doc in &docs {
        store::save_round(&dir, doc)?;
    }

    // Metadata covers the whole season directory, not just this run
    let classifier = settings.classifier();
    let all: Vec<RoundDocument> = store::load_documents(&dir)?
        .into_iter()
        .map(|d| RoundDocument::classified(&d.season, d.round, &classifier))
        .collect();
    store::save_metadata(&settings.metadata_path(), &Metadata::from_documents(&settings.season, &all))?;

    eprintln!("Saved {} rounds to {}", docs.len(), dir.display());
    Ok(())
}

fn compute_standings(settings: &Settings) -> Result<StandingsDocument> {
    let rounds = store::load_rounds(&settings.rounds_dir())?;
    let standings = StandingsAggregator::new(settings.classifier(), &settings.ladder).aggregate(&rounds)?;
    let doc = StandingsDocument::new(&settings.season, standings);
    store::save_standings(&settings.standings_path(), &doc)?;
    ::log::info!(
        "standings: {} participants, {} rounds counted",
        doc.standings.entries.len(),
        doc.standings.rounds_counted.len()
    );
    Ok(doc)
}

fn emit_standings(doc: &StandingsDocument, format: Format, out: Option<&str>) -> Result<()> {
    let (headers, rows) = doc.standings.table();

    if let Some(o) = out {
        let default_name = format!("standings.{}", format.ext());
        let path = resolve_single_out_path(o, &default_name)?;
        match format {
            Format::Csv => write_delimited(&path, &headers, &rows, ',')?,
            Format::Tsv => write_delimited(&path, &headers, &rows, '\t')?,
            Format::Json => crate::file::write_json(&path, doc)?,
            Format::Table => fs::write(&path, render_table(doc))?,
        }
        eprintln!("Wrote {}", path.display());
        return Ok(());
    }

    let text = match format {
        Format::Table => render_table(doc),
        Format::Json => serde_json::to_string_pretty(doc)? + "\n",
        Format::Csv => rows_to_string(&rows, Some(&headers), ','),
        Format::Tsv => rows_to_string(&rows, Some(&headers), '\t'),
    };
    io::stdout().write_all(text.as_bytes())?;
    Ok(())
}

fn print_status(settings: &Settings) -> Result<()> {
    let classifier = settings.classifier();
    let expected = classifier.expected_fixtures();
    for doc in store::load_documents(&settings.rounds_dir())? {
        let round = &doc.round;
        match classifier.classify(round) {
            Ok(status) => println!("{:>3}  {:<12} {}/{}", round.number, status, round.results_in(), expected),
            Err(e) => println!("{:>3}  {:<12} {}", round.number, "malformed", e.kind),
        }
    }
    Ok(())
}

/// Aligned text table: names left, numbers right.
fn render_table(doc: &StandingsDocument) -> String {
    let (headers, rows) = doc.standings.table();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| -> String {
        let mut s = s!();
        for (i, (cell, w)) in cells.iter().zip(&widths).enumerate() {
            if i > 0 { s.push_str("  "); }
            let pad = " ".repeat(w - cell.chars().count());
            if i == 1 { s.push_str(cell); s.push_str(&pad); } else { s.push_str(&pad); s.push_str(cell); }
        }
        join!(s.trim_end(), "\n")
    };

    let mut out = format!("Wurstliga {} ({} rounds counted)\n", doc.season, doc.standings.rounds_counted.len());
    out.push_str(&line(&headers));
    for row in &rows {
        out.push_str(&line(row));
    }
    out
}

/// `"1-5,9"` → `[1, 2, 3, 4, 5, 9]`; sorted, deduplicated, no round 0.
fn parse_ids_list(s: &str) -> Result<Vec<u32>> {
    let mut out = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() { continue; }
        if let Some((a, b)) = part.split_once('-') {
            let a: u32 = a.trim().parse().map_err(|_| eyre!("Invalid round: {part}"))?;
            let b: u32 = b.trim().parse().map_err(|_| eyre!("Invalid round: {part}"))?;
            if a > b { bail!("Invalid range: {part}"); }
            out.extend(a..=b);
        } else {
            out.push(part.parse().map_err(|_| eyre!("Invalid round: {part}"))?);
        }
    }
    if out.contains(&0) { bail!("Rounds start at 1"); }
    if out.is_empty() { bail!("No rounds selected"); }
    out.sort_unstable();
    out.dedup();
    Ok(out)
}

/// Progress on stderr so stdout stays clean for piping.
#[derive(Default)]
struct ConsoleProgress {
    total: usize,
    done: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, round: u32) {
        self.done += 1;
        ::log::debug!("round {round} done ({}/{})", self.done, self.total);
    }
    fn finish(&mut self) {
        eprintln!("Done: {}/{} rounds", self.done, self.total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{SeasonStandings, SeasonStandingsEntry};

    #[test]
    fn ids_list_ranges_and_singles() {
        assert_eq!(parse_ids_list("1-3, 9,2").unwrap(), vec![1, 2, 3, 9]);
        assert_eq!(parse_ids_list("34").unwrap(), vec![34]);
        assert!(parse_ids_list("5-3").is_err());
        assert!(parse_ids_list("0-2").is_err());
        assert!(parse_ids_list("x").is_err());
        assert!(parse_ids_list(" , ").is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["wurstliga", "standings", "--format", "csv", "--season", "2024-25", "-v"]).unwrap();
        assert_eq!(cli.season.as_deref(), Some("2024-25"));
        assert_eq!(cli.verbose, 1);
        assert!(matches!(cli.command, Command::Standings { format: Format::Csv, out: None }));
    }

    #[test]
    fn table_aligns_columns() {
        let standings = SeasonStandings {
            rounds_counted: vec![1],
            entries: vec![
                SeasonStandingsEntry { participant: s!("Anna"), total_points: 10, rounds_counted: 1, ..Default::default() },
                SeasonStandingsEntry { participant: s!("Bo"), total_points: 8, rounds_counted: 1, ..Default::default() },
            ],
            rounds: vec![],
        };
        let doc = StandingsDocument { season: s!("2025-26"), updated_at: s!(), standings };
        let text = render_table(&doc);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Wurstliga 2025-26 (1 rounds counted)");
        assert!(lines[1].starts_with("Pos  Name  Pts"));
        assert!(lines[3].starts_with("  2  Bo      8"));
    }
}
