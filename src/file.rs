// src/file.rs

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::csv::write_row;
use crate::error::Result;

/// Pretty JSON, UTF-8 as-is (umlauts stay readable). Creates parent dirs.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let file = File::create(path)?; // truncate/overwrite
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Create/truncate `path` and write CSV/TSV rows, header first.
pub fn write_delimited(
    path: &Path,
    headers: &[String],
    rows: &[Vec<String>],
    sep: char,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    write_row(&mut out, headers, sep)?;
    for row in rows {
        write_row(&mut out, row, sep)?;
    }
    out.flush()?;
    Ok(())
}

/// `-o` handling: empty → default file name; trailing separator or an
/// existing directory → default file name inside it; otherwise as given.
pub fn resolve_single_out_path(user_o: &str, default_filename: &str) -> Result<PathBuf> {
    if user_o.is_empty() { return Ok(PathBuf::from(default_filename)); }
    let p = PathBuf::from(normalize_separators(user_o));
    if looks_like_dir_hint(user_o) || p.is_dir() {
        ensure_directory(&p)?; Ok(p.join(default_filename))
    } else {
        Ok(p)
    }
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c=='/'||c=='\\' { sep } else { c }).collect()
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        )
        .into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

fn looks_like_dir_hint(p: &str) -> bool {
    p.ends_with('/') || p.ends_with('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_path_resolution() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolve_single_out_path("", "standings.csv").unwrap(), PathBuf::from("standings.csv"));

        let d = dir.path().to_string_lossy().into_owned();
        assert_eq!(resolve_single_out_path(&d, "standings.csv").unwrap(), dir.path().join("standings.csv"));

        let hinted = format!("{d}/sub/");
        let resolved = resolve_single_out_path(&hinted, "standings.csv").unwrap();
        assert!(dir.path().join("sub").is_dir());
        assert!(resolved.ends_with("standings.csv"));

        let file = format!("{d}/table.tsv");
        assert!(resolve_single_out_path(&file, "standings.csv").unwrap().ends_with("table.tsv"));
    }

    #[test]
    fn file_in_the_way_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("rounds");
        fs::write(&blocker, "x").unwrap();
        assert!(ensure_directory(&blocker).is_err());
    }
}
