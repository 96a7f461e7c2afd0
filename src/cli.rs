// src/cli.rs
use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::consts::{CONFIG_FILE, DEFAULT_SEASON};
use crate::config::file;
use crate::config::options::{parse_game_ids, AppOptions, ExportType, GameSelector};
use crate::error::{Result, ScrapeError};
use crate::progress::Progress;

/// Reconcile NHL play-by-play, rosters and shifts into on-ice event tables.
#[derive(Parser, Debug)]
#[command(name = "nhl_scrape", version, about, long_about = None)]
pub struct Args {
    /// One game id, e.g. 2023020005
    #[arg(short, long, conflicts_with_all = ["games", "team"])]
    pub game: Option<u64>,

    /// Game ids with ranges: 2023020001,2023020005-2023020007
    #[arg(long, value_name = "IDS", conflicts_with = "team")]
    pub games: Option<String>,

    /// Every finished game of a club, e.g. MTL
    #[arg(short, long)]
    pub team: Option<String>,

    /// Season for --team, e.g. 20232024
    #[arg(short, long, requires = "team")]
    pub season: Option<u32>,

    /// Shift source: html (TH/TV reports) or api (shift charts)
    #[arg(long, value_name = "html|api")]
    pub shifts: Option<String>,

    /// Output directory, or file path whose stem names the merged files
    #[arg(short, long)]
    pub out: Option<String>,

    /// csv or tsv
    #[arg(long)]
    pub format: Option<String>,

    /// Tables to write: pbp,rosters,shifts
    #[arg(long, value_delimiter = ',')]
    pub tables: Vec<String>,

    /// One file per game per table instead of merged files
    #[arg(long)]
    pub per_game: bool,

    #[arg(long)]
    pub no_headers: bool,

    /// Always refetch instead of reading `.store/`
    #[arg(long)]
    pub no_cache: bool,

    #[arg(long)]
    pub workers: Option<usize>,

    /// key=value defaults file
    #[arg(long, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// -v info, -vv debug, -vvv trace
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Flags on top of whatever the config file set.
    pub fn apply(&self, opts: &mut AppOptions) -> Result<()> {
        if let Some(id) = self.game {
            opts.scrape.games = GameSelector::One(id);
        }
        if let Some(list) = &self.games {
            opts.scrape.games = GameSelector::Ids(parse_game_ids(list)?);
        }
        if let Some(team) = &self.team {
            let season = self.season.unwrap_or(match &opts.scrape.games {
                GameSelector::TeamSeason { season, .. } => *season,
                _ => DEFAULT_SEASON,
            });
            opts.scrape.games = GameSelector::TeamSeason { team: team.trim().to_ascii_uppercase(), season };
        }
        if let Some(s) = &self.shifts {
            opts.scrape.shifts = s.parse()?;
        }
        if let Some(out) = &self.out {
            opts.export.set_path(out);
        }
        if let Some(f) = &self.format {
            opts.export.format = f.parse()?;
        }
        if !self.tables.is_empty() {
            let mut tables = self.tables.iter().map(|t| t.parse()).collect::<Result<Vec<_>>>()?;
            tables.sort();
            tables.dedup();
            opts.export.tables = tables;
        }
        if self.per_game {
            opts.export.export_type = ExportType::PerGame;
        }
        if self.no_headers {
            opts.export.include_headers = false;
        }
        if self.no_cache {
            opts.scrape.use_cache = false;
        }
        if let Some(n) = self.workers {
            opts.scrape.workers = n.max(1);
        }
        Ok(())
    }
}

/// Progress on stderr, one line per game.
#[derive(Default)]
pub struct CliProgress {
    done: usize,
    failed: usize,
    total: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        eprintln!("Scraping {total} game(s)…");
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, game_id: u64) {
        self.done += 1;
        eprintln!("[{}/{}] {game_id} ok", self.done + self.failed, self.total);
    }
    fn item_failed(&mut self, game_id: u64, reason: &str) {
        self.failed += 1;
        eprintln!("[{}/{}] {game_id} FAILED: {reason}", self.done + self.failed, self.total);
    }
    fn finish(&mut self) {
        eprintln!("Done: {} ok, {} failed", self.done, self.failed);
    }
}

pub fn run(args: Args) -> Result<()> {
    let mut opts = file::load(&args.config);
    args.apply(&mut opts)?;

    if matches!(&opts.scrape.games, GameSelector::Ids(ids) if ids.is_empty()) {
        return Err(ScrapeError::InvalidArgument(s!("no games selected; use --game, --games or --team")));
    }

    let source = crate::scrape::default_source(&opts.scrape)?;
    let mut progress = CliProgress::default();
    let summary = crate::scrape::collect_games(source, &opts.scrape, Some(&mut progress))?;

    let warnings: usize = summary.reports.iter().map(|r| r.warnings.len()).sum();
    if warnings > 0 {
        progress.log(&format!("{warnings} data warning(s); see the log for details"));
    }
    if summary.reports.is_empty() {
        return Err(ScrapeError::InvalidArgument(format!(
            "all {} game(s) failed",
            summary.failures.len()
        )));
    }

    for path in crate::file::export_tables(&opts.export, &summary.reports)? {
        println!("{}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::{ExportFormat, ShiftSource, TableKind};

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "nhl_scrape", "--team", "tor", "--season", "20222023", "--shifts", "api",
            "--format", "tsv", "--tables", "shifts,pbp", "--per-game", "--no-cache", "-vv",
        ]);
        let mut opts = AppOptions::default();
        args.apply(&mut opts).unwrap();

        assert_eq!(opts.scrape.games, GameSelector::TeamSeason { team: s!("TOR"), season: 20222023 });
        assert_eq!(opts.scrape.shifts, ShiftSource::Api);
        assert!(!opts.scrape.use_cache);
        assert_eq!(opts.export.format, ExportFormat::Tsv);
        assert_eq!(opts.export.tables, vec![TableKind::Pbp, TableKind::Shifts]);
        assert_eq!(opts.export.export_type, ExportType::PerGame);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn game_list_and_bad_values() {
        let args = Args::parse_from(["nhl_scrape", "--games", "2023020001-2023020003"]);
        let mut opts = AppOptions::default();
        args.apply(&mut opts).unwrap();
        assert_eq!(opts.scrape.games, GameSelector::Ids(vec![2023020001, 2023020002, 2023020003]));

        let args = Args::parse_from(["nhl_scrape", "--game", "1", "--format", "xml"]);
        assert!(matches!(args.apply(&mut AppOptions::default()), Err(ScrapeError::InvalidArgument(_))));
    }
}
