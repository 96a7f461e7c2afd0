// src/table.rs
//
// Flat projections of game reports. On-ice lists only become fixed-width
// `*_skater_id{n}` columns here, sized to the widest snapshot in the set.
use crate::config::consts::PERIOD_SECONDS;
use crate::core::time::seconds_to_clock;
use crate::engine::types::{EventRow, OnIce, Side};
use crate::engine::GameReport;
use crate::store::DataSet;

const GAME_COLS: [&str; 10] = [
    "game_id", "season", "game_type", "game_date", "venue", "start_time_utc",
    "home_abbr", "home_name", "away_abbr", "away_name",
];

const EVENT_COLS: [&str; 27] = [
    "event_id", "sort_order", "event", "period", "period_type", "time_in_period",
    "time_remaining", "elapsed", "event_team", "is_home", "zone", "home_defending_side",
    "x", "y", "x_norm", "y_norm", "x_vert", "y_vert",
    "shot_type", "reason", "secondary_reason", "penalty", "penalty_minutes", "situation_code",
    "strength", "opposing_goalie_id", "opposing_goalie_fullName",
];

const TALLY_COLS: [&str; 4] = ["home_score", "away_score", "home_sog", "away_sog"];

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

fn game_cells(r: &GameReport) -> Vec<String> {
    let g = &r.game;
    vec![
        g.id.to_string(),
        g.season.to_string(),
        s!(g.game_type.as_str()),
        g.date.clone(),
        g.venue.clone(),
        g.start_time_utc.clone(),
        g.home.abbrev.clone(),
        g.home.name.clone(),
        g.away.abbrev.clone(),
        g.away.name.clone(),
    ]
}

fn widest(reports: &[GameReport], side: Side) -> usize {
    reports
        .iter()
        .flat_map(|r| r.rows.iter())
        .filter_map(|row| row.on_ice(side).map(|o| o.skaters.len()))
        .max()
        .unwrap_or(0)
}

/// One row per event across all reports, in game then event order.
pub fn events_table(reports: &[GameReport]) -> DataSet {
    let (home_w, away_w) = (widest(reports, Side::Home), widest(reports, Side::Away));

    let mut headers: Vec<String> = GAME_COLS.iter().chain(EVENT_COLS.iter()).map(|h| s!(*h)).collect();
    for n in 1..=3 {
        for suffix in ["id", "role", "fullName", "team"] {
            headers.push(format!("event_player{n}_{suffix}"));
        }
    }
    headers.extend(TALLY_COLS.iter().map(|h| s!(*h)));
    for (side, width) in [(Side::Home, home_w), (Side::Away, away_w)] {
        headers.push(format!("{side}_goalie_id"));
        headers.push(format!("{side}_goalie_fullName"));
        for n in 1..=width {
            headers.push(format!("{side}_skater_id{n}"));
        }
        for n in 1..=width {
            headers.push(format!("{side}_skater_fullName{n}"));
        }
    }

    let mut rows = Vec::new();
    for report in reports {
        let game = game_cells(report);
        for row in &report.rows {
            let mut cells = game.clone();
            cells.extend(event_cells(report, row));
            on_ice_cells(report, row.home.as_ref(), home_w, &mut cells);
            on_ice_cells(report, row.away.as_ref(), away_w, &mut cells);
            rows.push(cells);
        }
    }
    DataSet { headers: Some(headers), rows }
}

fn event_cells(report: &GameReport, row: &EventRow) -> Vec<String> {
    let e = &row.event;
    let name = |id: Option<u64>| opt(id.and_then(|id| report.player_name(id)));
    let team_abbrev = e.team.map(|side| report.game.team(side).abbrev.clone());
    let is_home = e.team.map(|side| u8::from(side == Side::Home));

    let mut cells = vec![
        e.event_id.to_string(),
        e.sort_order.to_string(),
        s!(e.event_type.key()),
        e.period.to_string(),
        e.period_type.clone(),
        seconds_to_clock(e.clock),
        opt(e.time_remaining.map(seconds_to_clock)),
        opt(e.elapsed),
        opt(team_abbrev),
        opt(is_home),
        opt(e.zone.map(|z| z.code())),
        opt(e.home_defending.map(|d| d.as_str())),
        opt(e.raw.map(|c| c.x)),
        opt(e.raw.map(|c| c.y)),
        opt(e.norm.map(|c| c.x)),
        opt(e.norm.map(|c| c.y)),
        opt(e.norm.map(|c| c.vx)),
        opt(e.norm.map(|c| c.vy)),
        opt(e.shot_type.as_deref()),
        opt(e.reason.as_deref()),
        opt(e.secondary_reason.as_deref()),
        opt(e.penalty_key.as_deref()),
        opt(e.penalty_minutes),
        opt(e.situation_code.as_deref()),
        opt(row.strength),
        opt(e.goalie_in_net),
        name(e.goalie_in_net),
    ];

    for slot in &e.participants {
        match slot {
            Some(p) => {
                let player = report.players.get(p.player_id);
                cells.push(p.player_id.to_string());
                cells.push(s!(p.role.as_str()));
                cells.push(opt(player.map(|pl| pl.full_name.as_str())));
                cells.push(opt(player.map(|pl| pl.team_abbrev.as_str())));
            }
            None => cells.extend(std::iter::repeat_n(s!(), 4)),
        }
    }

    let t = e.tally;
    cells.extend([t.home_score, t.away_score, t.home_sog, t.away_sog].map(|v| v.to_string()));
    cells
}

fn on_ice_cells(report: &GameReport, on_ice: Option<&OnIce>, width: usize, cells: &mut Vec<String>) {
    let name = |id: u64| opt(report.player_name(id));
    let goalie = on_ice.and_then(|o| o.goalie);
    cells.push(opt(goalie));
    cells.push(goalie.map(name).unwrap_or_default());

    let skaters: &[u64] = on_ice.map(|o| o.skaters.as_slice()).unwrap_or_default();
    for n in 0..width {
        cells.push(opt(skaters.get(n)));
    }
    for n in 0..width {
        cells.push(skaters.get(n).map(|&id| name(id)).unwrap_or_default());
    }
}

/// One row per player per game.
pub fn rosters_table(reports: &[GameReport]) -> DataSet {
    let headers = [
        "game_id", "player_id", "side", "team", "sweater", "first_name", "last_name",
        "full_name", "position", "report_name",
    ];
    let rows = reports
        .iter()
        .flat_map(|r| r.players.players().map(move |p| (r.game.id, p)))
        .map(|(game_id, p)| {
            vec![
                game_id.to_string(),
                p.id.to_string(),
                s!(p.side.as_str()),
                p.team_abbrev.clone(),
                p.sweater.to_string(),
                p.first_name.clone(),
                p.last_name.clone(),
                p.full_name.clone(),
                s!(p.position.code()),
                p.report_name.clone().unwrap_or_default(),
            ]
        })
        .collect();
    DataSet { headers: Some(headers.iter().map(|h| s!(*h)).collect()), rows }
}

/// One row per shift per game, unresolved shifts included with an empty player.
pub fn shifts_table(reports: &[GameReport]) -> DataSet {
    let headers = [
        "game_id", "player_id", "full_name", "side", "team", "sweater", "period",
        "start", "end", "duration", "start_clock", "end_clock", "start_type",
    ];
    let mut rows = Vec::new();
    for r in reports {
        for shift in &r.shifts {
            let period_start = (shift.period as u32).saturating_sub(1) * PERIOD_SECONDS;
            rows.push(vec![
                r.game.id.to_string(),
                opt(shift.player_id),
                opt(shift.player_id.and_then(|id| r.player_name(id))),
                s!(shift.side.as_str()),
                r.game.team(shift.side).abbrev.clone(),
                opt(shift.sweater),
                shift.period.to_string(),
                shift.start.to_string(),
                shift.end.to_string(),
                shift.duration().to_string(),
                seconds_to_clock(shift.start.saturating_sub(period_start)),
                seconds_to_clock(shift.end.saturating_sub(period_start)),
                shift.start_type.to_string(),
            ]);
        }
    }
    DataSet { headers: Some(headers.iter().map(|h| s!(*h)).collect()), rows }
}
