// src/config/file.rs
//
// Optional `key=value` defaults file. Unknown keys and bad values are logged and
// skipped; CLI flags are applied on top of whatever this produces.
use std::{fs, path::Path};

use super::options::{AppOptions, ExportType, GameSelector};

pub fn load(path: &Path) -> AppOptions {
    let mut opts = AppOptions::default();
    if !path.exists() {
        return opts;
    }
    match fs::read_to_string(path) {
        Ok(text) => apply(&mut opts, &text),
        Err(e) => tracing::warn!("could not read {}: {e}", path.display()),
    }
    opts
}

/// Apply every recognised `key=value` line of `text` to `opts`.
pub fn apply(opts: &mut AppOptions, text: &str) {
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue; }
        let Some((key, val)) = line.split_once('=') else {
            tracing::warn!("config: ignoring line without '=': {line}");
            continue;
        };
        let (key, val) = (key.trim(), val.trim());
        if let Err(msg) = apply_one(opts, key, val) {
            tracing::warn!("config: {key}: {msg}");
        }
    }
}

fn apply_one(opts: &mut AppOptions, key: &str, val: &str) -> Result<(), String> {
    match key {
        "shifts" => opts.scrape.shifts = val.parse().map_err(|e| format!("{e}"))?,
        "use_cache" => opts.scrape.use_cache = parse_bool(val)?,
        "workers" => {
            let n: usize = val.parse().map_err(|_| s!("expected a number"))?;
            opts.scrape.workers = n.max(1);
        }
        "team" => {
            let season = match &opts.scrape.games {
                GameSelector::TeamSeason { season, .. } => *season,
                _ => super::consts::DEFAULT_SEASON,
            };
            opts.scrape.games = GameSelector::TeamSeason { team: val.to_ascii_uppercase(), season };
        }
        "season" => {
            let season: u32 = val.parse().map_err(|_| s!("expected e.g. 20232024"))?;
            if let GameSelector::TeamSeason { season: s, .. } = &mut opts.scrape.games {
                *s = season;
            } else {
                return Err(s!("set `team` before `season`"));
            }
        }
        "format" => opts.export.format = val.parse().map_err(|e| format!("{e}"))?,
        "per_game" => {
            opts.export.export_type = if parse_bool(val)? { ExportType::PerGame } else { ExportType::SingleFile };
        }
        "include_headers" => opts.export.include_headers = parse_bool(val)?,
        "out_path" => opts.export.set_path(val),
        "tables" => {
            let mut tables = Vec::new();
            for t in val.split(',').filter(|t| !t.trim().is_empty()) {
                tables.push(t.parse().map_err(|e| format!("{e}"))?);
            }
            tables.sort();
            tables.dedup();
            opts.export.tables = tables;
        }
        _ => return Err(s!("unknown key")),
    }
    Ok(())
}

fn parse_bool(val: &str) -> Result<bool, String> {
    match val {
        "1" => Ok(true),
        "0" => Ok(false),
        v if v.eq_ignore_ascii_case("true") => Ok(true),
        v if v.eq_ignore_ascii_case("false") => Ok(false),
        v => Err(format!("expected a boolean, got {v:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::{ExportFormat, ShiftSource, TableKind};

    #[test]
    fn applies_known_keys_and_skips_the_rest() {
        let mut opts = AppOptions::default();
        apply(&mut opts, "
            # comment
            shifts = api
            format=tsv
            per_game=1
            team=mtl
            season=20222023
            tables=shifts,pbp
            bogus=3
            not a pair
        ");
        assert_eq!(opts.scrape.shifts, ShiftSource::Api);
        assert_eq!(opts.export.format, ExportFormat::Tsv);
        assert_eq!(opts.export.export_type, ExportType::PerGame);
        assert_eq!(opts.export.tables, vec![TableKind::Pbp, TableKind::Shifts]);
        assert_eq!(
            opts.scrape.games,
            GameSelector::TeamSeason { team: s!("MTL"), season: 20222023 }
        );
    }

    #[test]
    fn missing_file_gives_defaults() {
        let opts = load(Path::new("definitely/not/here.cfg"));
        assert_eq!(opts, AppOptions::default());
    }
}
