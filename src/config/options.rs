// src/config/options.rs
use std::path::{ Path, PathBuf };
use std::str::FromStr;

use super::consts::*;
use crate::error::ScrapeError;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameSelector {
    One(u64),
    Ids(Vec<u64>),
    /// Every finished game on a club's schedule, e.g. `MTL` / `20232024`.
    TeamSeason { team: String, season: u32 },
}

/// Where shift intervals come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ShiftSource {
    /// TH/TV HTML shift reports, keyed by sweater number.
    #[default]
    Html,
    /// Shift-chart JSON, keyed by player id.
    Api,
}

impl FromStr for ShiftSource {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(ShiftSource::Html),
            "api" => Ok(ShiftSource::Api),
            other => Err(ScrapeError::InvalidArgument(format!("unknown shift source: {other}"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub games: GameSelector,
    pub shifts: ShiftSource,
    pub use_cache: bool,
    pub workers: usize,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            games: GameSelector::Ids(Vec::new()),
            shifts: ShiftSource::Html,
            use_cache: true,
            workers: WORKERS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportType {
    SingleFile,
    PerGame,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
}

impl FromStr for ExportFormat {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "tsv" => Ok(ExportFormat::Tsv),
            other => Err(ScrapeError::InvalidArgument(format!("unknown format: {other}"))),
        }
    }
}

/// The three tables a game produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TableKind {
    Pbp,
    Rosters,
    Shifts,
}

impl TableKind {
    pub const ALL: [TableKind; 3] = [TableKind::Pbp, TableKind::Rosters, TableKind::Shifts];

    pub fn stem(&self) -> &'static str {
        match self {
            TableKind::Pbp => "pbp",
            TableKind::Rosters => "rosters",
            TableKind::Shifts => "shifts",
        }
    }
}

impl FromStr for TableKind {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pbp" | "events" => Ok(TableKind::Pbp),
            "rosters" | "roster" => Ok(TableKind::Rosters),
            "shifts" => Ok(TableKind::Shifts),
            other => Err(ScrapeError::InvalidArgument(format!("unknown table: {other}"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub export_type: ExportType,
    pub out_dir: PathBuf,
    /// Used for merged files: `<out_dir>/<stem>_<table>.<ext>`
    pub file_stem: String,
    pub include_headers: bool,
    pub tables: Vec<TableKind>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            export_type: ExportType::SingleFile,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: s!(DEFAULT_FILE),
            include_headers: true,
            tables: TableKind::ALL.to_vec(),
        }
    }
}

impl ExportOptions {
    /// Path of the merged file for one table.
    pub fn single_path(&self, table: TableKind) -> PathBuf {
        let name = join!(&self.file_stem, "_", table.stem(), ".", self.format.ext());
        self.out_dir.join(name)
    }

    /// Path of one game's file for one table.
    pub fn per_game_path(&self, game_id: u64, table: TableKind) -> PathBuf {
        let name = format!("{game_id}_{}.{}", table.stem(), self.format.ext());
        self.out_dir.join(name)
    }

    /// Parse user text into dir + stem. A pasted extension is ignored; format controls it.
    pub fn set_path(&mut self, text: &str) {
        let s = text.trim();
        let p = Path::new(s);
        let looks_like_dir = s.ends_with('/') || s.ends_with('\\') || p.extension().is_none();
        if looks_like_dir {
            self.out_dir = PathBuf::from(s);
            return;
        }
        if let Some(parent) = p.parent() {
            self.out_dir = parent.to_path_buf();
        }
        if let Some(stem) = p.file_stem() {
            self.file_stem = stem.to_string_lossy().into_owned();
        }
    }
}

/// Comma list with optional inclusive ranges: `2023020001,2023020005-2023020007`.
pub fn parse_game_ids(s: &str) -> Result<Vec<u64>, ScrapeError> {
    let bad = |part: &str| ScrapeError::InvalidArgument(format!("invalid game id: {part}"));
    let mut out = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() { continue; }
        if let Some((a, b)) = part.split_once('-') {
            let a: u64 = a.trim().parse().map_err(|_| bad(part))?;
            let b: u64 = b.trim().parse().map_err(|_| bad(part))?;
            if a > b { return Err(ScrapeError::InvalidArgument(format!("invalid range: {part}"))); }
            out.extend(a..=b);
        } else {
            out.push(part.parse().map_err(|_| bad(part))?);
        }
    }
    out.sort_unstable();
    out.dedup();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_id_ranges_expand_and_dedup() {
        let ids = parse_game_ids("2023020005-2023020007, 2023020001,2023020006").unwrap();
        assert_eq!(ids, vec![2023020001, 2023020005, 2023020006, 2023020007]);
        assert!(parse_game_ids("2023020007-2023020005").is_err());
        assert!(parse_game_ids("abc").is_err());
    }

    #[test]
    fn set_path_splits_dir_and_stem() {
        let mut export = ExportOptions::default();
        export.set_path("data/games/season.txt");
        assert_eq!(export.out_dir, PathBuf::from("data/games"));
        assert_eq!(export.file_stem, "season");
        // extension comes from the format, not the text
        assert!(export.single_path(TableKind::Pbp).to_string_lossy().ends_with("season_pbp.csv"));

        export.set_path("elsewhere/");
        assert_eq!(export.out_dir, PathBuf::from("elsewhere/"));
        assert_eq!(export.file_stem, "season");
    }

    #[test]
    fn unknown_values_are_invalid_arguments() {
        assert!(matches!("xml".parse::<ExportFormat>(), Err(ScrapeError::InvalidArgument(_))));
        assert!(matches!("json".parse::<ShiftSource>(), Err(ScrapeError::InvalidArgument(_))));
        assert_eq!("Events".parse::<TableKind>().unwrap(), TableKind::Pbp);
    }
}
