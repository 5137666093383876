//! High-score file.
//!
//! Append-only text, one record per line: `<name> - Score: <score>`.  The
//! default file is always read; a player-supplied file is merged in.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use crate::error::ScoreError;

pub const DEFAULT_SCORE_FILE: &str = "scores/score-list.txt";
pub const DEFAULT_NAME: &str = "Player";
pub const TOP_COUNT: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreEntry {
    /// The whole record line, shown as is.
    pub line: String,
    /// Signed so hand-edited files with negative scores still parse.
    pub score: i64,
}

impl ScoreEntry {
    pub fn placeholder() -> Self {
        ScoreEntry { line: "___".to_string(), score: 0 }
    }
}

/// The default file is always accepted.  Anything else must be an
/// existing `.txt` file.
pub fn check_path(path: &Path, default: &Path) -> Result<(), ScoreError> {
    if path == default {
        return Ok(());
    }
    let is_txt = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("txt"));
    if !is_txt {
        return Err(ScoreError::UnsupportedFormat { path: path.to_path_buf() });
    }
    if !path.exists() {
        return Err(ScoreError::NotFound { path: path.to_path_buf() });
    }
    Ok(())
}

pub fn format_record(name: &str, score: u32) -> String {
    let name = name.trim();
    let name = if name.is_empty() { DEFAULT_NAME } else { name };
    format!("{} - Score: {}", name, score)
}

/// Append one record, creating parent directories as needed.
pub fn write_score(path: &Path, name: &str, score: u32) -> Result<(), ScoreError> {
    let write_err = |source| ScoreError::Write { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path).map_err(write_err)?;
    writeln!(file, "{}", format_record(name, score)).map_err(write_err)?;
    log::info!("saved score {} to {}", score, path.display());
    Ok(())
}

/// Parse one record line.  `None` for anything that is not exactly
/// `<text>: <integer>`; the integer may carry a sign.
pub fn parse_line(line: &str) -> Option<ScoreEntry> {
    let line = line.trim();
    let parts: Vec<&str> = line.split(": ").collect();
    if parts.len() != 2 {
        return None;
    }
    let score = parts[1].trim().parse().ok()?;
    Some(ScoreEntry { line: line.to_string(), score })
}

pub fn read_scores(path: &Path) -> Result<Vec<ScoreEntry>, ScoreError> {
    let contents = fs::read_to_string(path)
        .map_err(|source| ScoreError::Read { path: path.to_path_buf(), source })?;
    let mut entries = Vec::new();
    for (n, line) in contents.lines().enumerate() {
        match parse_line(line) {
            Some(entry) => entries.push(entry),
            None if line.trim().is_empty() => {}
            None => log::debug!("skipping malformed line {} in {}: {:?}", n + 1, path.display(), line),
        }
    }
    Ok(entries)
}

/// The five best records plus an error title when a file could not be read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopScores {
    pub entries: Vec<ScoreEntry>,
    pub error: Option<&'static str>,
}

pub fn top_scores(default: &Path, user: Option<&Path>) -> TopScores {
    let mut entries = Vec::new();
    let mut error = None;

    if let Some(user) = user {
        match read_scores(user) {
            Ok(mut found) => entries.append(&mut found),
            Err(e) => {
                log::warn!("{}", e);
                error = Some("Error reading user file!");
            }
        }
    }

    match read_scores(default) {
        Ok(mut found) => entries.append(&mut found),
        // Nothing saved yet.
        Err(ScoreError::Read { source, .. }) if source.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            log::warn!("{}", e);
            error = Some("Error reading file!");
        }
    }

    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(TOP_COUNT);
    entries.resize(TOP_COUNT, ScoreEntry::placeholder());
    TopScores { entries, error }
}
