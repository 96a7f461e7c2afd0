// src/scrape/scrape.rs
use std::{
    thread, time::Duration,
    sync::{ mpsc, Arc, atomic::{ AtomicUsize, Ordering }}
};

use crate::{
    config::options::{ GameSelector, ScrapeOptions, ShiftSource },
    config::consts::{ STORE_DIR, REQUEST_PAUSE_MS, JITTER_MS },

    core::net::{ CachedSource, HttpSource, Source },
    engine::{ build_game, reconcile_game, GameReport, types::Side },
    error::{ Result, ScrapeError },
    progress::Progress,
    specs::{ play_by_play, schedule, shift_charts, shift_report },
};

/// Reports sorted by game id, plus the games that failed and why.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub reports: Vec<GameReport>,
    pub failures: Vec<(u64, ScrapeError)>,
}

/// HTTP source, behind the local store unless caching is off.
pub fn default_source(scrape: &ScrapeOptions) -> Result<Arc<dyn Source>> {
    let http = HttpSource::new()?;
    let source: Arc<dyn Source> = if scrape.use_cache {
        Arc::new(CachedSource::new(http, STORE_DIR))
    } else {
        Arc::new(http)
    };
    Ok(source)
}

pub fn resolve_game_ids(source: &dyn Source, sel: &GameSelector) -> Result<Vec<u64>> {
    Ok(match sel {
        GameSelector::One(id) => vec![*id],
        GameSelector::Ids(v)  => v.clone(),
        GameSelector::TeamSeason { team, season } => {
            let mut ids: Vec<u64> = schedule::fetch(source, team, *season)?
                .into_iter()
                .filter(|g| g.is_finished())
                .map(|g| g.id)
                .collect();
            ids.sort_unstable();
            ids.dedup();
            ids
        }
    })
}

/// Fetch every payload one game needs and reconcile it.
pub fn collect_game(source: &dyn Source, game_id: u64, shifts: ShiftSource) -> Result<GameReport> {
    let pbp = play_by_play::fetch(source, game_id)?;

    let (report_players, raw_shifts) = match shifts {
        ShiftSource::Html => {
            let mut players = Vec::new();
            let mut raw = Vec::new();
            for side in Side::BOTH {
                let report = shift_report::fetch(source, game_id, side)?;
                tracing::debug!(game = game_id, %side, team = %report.team_name, shifts = report.shifts.len(), "shift report");
                players.extend(report.players);
                raw.extend(report.shifts);
            }
            (players, raw)
        }
        ShiftSource::Api => {
            let game = build_game(&pbp)?;
            (Vec::new(), shift_charts::fetch(source, &game)?)
        }
    };

    reconcile_game(&pbp, &report_players, &raw_shifts)
}

/// Collect games according to selection. One game's failure never stops the batch.
pub fn collect_games(
    source: Arc<dyn Source>,
    scrape: &ScrapeOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<BatchSummary> {

    let ids = resolve_game_ids(source.as_ref(), &scrape.games)?;

    if let Some(p) = progress.as_deref_mut() {
        p.begin(ids.len());
    }

    // Concurrency
    type FetchResult = (u64, Result<GameReport>);

    let ids_arc = Arc::new(ids);
    let counter = Arc::new(AtomicUsize::new(0));
    let (res_tx, res_rx) = mpsc::channel::<FetchResult>();

    let workers = scrape.workers.min(ids_arc.len()).max(1);
    let shift_source = scrape.shifts;

    // Spawn workers

    for _ in 0..workers {
        let ids = Arc::clone(&ids_arc);
        let idx = Arc::clone(&counter);
        let source = Arc::clone(&source);
        let tx = res_tx.clone();

        thread::spawn(
            move || {
                loop {
                    let i = idx.fetch_add(1, Ordering::Relaxed);
                    if i >= ids.len() {
                        break;
                    }
                    let game_id = ids[i];
                    let result = collect_game(source.as_ref(), game_id, shift_source);
                    if tx.send((game_id, result)).is_err() {
                        break;
                    }
                    let jitter = game_id % JITTER_MS;
                    thread::sleep(Duration::from_millis(REQUEST_PAUSE_MS + jitter)); // be polite
                }
            }
        );
    }
    drop(res_tx); // main thread is sole receiver now

    // Aggregate results
    let mut summary = BatchSummary::default();

    for _ in 0..ids_arc.len() {
        match res_rx.recv() {
            Ok((id, Ok(report))) => {
                tracing::debug!(game = id, warnings = report.warnings.len(), "game done");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(id);
                }
                summary.reports.push(report);
            }
            Ok((id, Err(e))) => {
                if e.is_recoverable() {
                    tracing::warn!("game {id} skipped: {e}");
                } else {
                    tracing::error!("game {id} failed: {e}");
                }
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(id, &e.to_string());
                }
                summary.failures.push((id, e));
            }
            Err(_) => break, // workers ended early; bail gracefully
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    // Sort
    summary.reports.sort_by_key(|r| r.game.id);
    summary.failures.sort_by_key(|(id, _)| *id);

    Ok(summary)
}
