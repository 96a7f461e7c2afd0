// src/engine/engine.rs
use crate::engine::events::{faceoff_marks, normalize_events};
use crate::engine::on_ice::reconcile;
use crate::engine::roster::PlayerTable;
use crate::engine::shifts::ShiftIndex;
use crate::engine::types::*;
use crate::error::{Result, ScrapeError};
use crate::specs::play_by_play::{PlayByPlay, PlayTeam};

/// Everything reconciled for one game.
#[derive(Clone, Debug)]
pub struct GameReport {
    pub game: Game,
    pub players: PlayerTable,
    /// Resolved and unresolved shifts, by start.
    pub shifts: Vec<Shift>,
    pub rows: Vec<EventRow>,
    pub warnings: Vec<Warning>,
}

impl GameReport {
    pub fn player_name(&self, id: u64) -> Option<&str> {
        self.players.get(id).map(|p| p.full_name.as_str())
    }
}

/// Game metadata from the play-by-play payload. Both teams are required.
pub fn build_game(pbp: &PlayByPlay) -> Result<Game> {
    let team = |t: &Option<PlayTeam>, which: &'static str| {
        t.as_ref()
            .map(|t| TeamInfo { id: t.id, abbrev: t.abbrev.clone(), name: t.display_name() })
            .ok_or_else(|| ScrapeError::format(which, format!("game {} has no {which}", pbp.id)))
    };
    Ok(Game {
        id: pbp.id,
        date: pbp.game_date.clone(),
        season: pbp.season,
        game_type: GameType::from_code(pbp.game_type),
        venue: pbp.venue.default.clone(),
        start_time_utc: pbp.start_time_utc.clone(),
        home: team(&pbp.home_team, "homeTeam")?,
        away: team(&pbp.away_team, "awayTeam")?,
    })
}

/// Play-by-play + report roster + raw shifts -> one reconciled event table.
///
/// Only a payload without team metadata fails; every other problem is a
/// warning on the report.
pub fn reconcile_game(
    pbp: &PlayByPlay,
    report_players: &[ReportPlayer],
    raw_shifts: &[RawShift],
) -> Result<GameReport> {
    let game = build_game(pbp)?;
    let mut warnings = Warnings::new();

    let players = PlayerTable::build(&game, &pbp.roster_spots, report_players, &mut warnings);
    let events = normalize_events(&game, &pbp.plays, &mut warnings);
    let marks = faceoff_marks(&events);
    let index = ShiftIndex::build(raw_shifts, &players, &marks, game.game_type, &mut warnings);
    let rows = reconcile(events, &index, &players, &mut warnings);

    tracing::debug!(
        game = game.id,
        events = rows.len(),
        shifts = index.shifts().len(),
        warnings = warnings.len(),
        "game reconciled"
    );
    Ok(GameReport {
        shifts: index.shifts().to_vec(),
        game,
        players,
        rows,
        warnings: warnings.into_vec(),
    })
}
