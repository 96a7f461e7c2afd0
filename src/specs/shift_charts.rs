// src/specs/shift_charts.rs
//! Shift-chart JSON from the stats REST API.
//!
//! Rows carry the numeric player id, so nothing here needs sweater resolution.
//! Goal marker rows (`typeCode` 505) share the table and are skipped.

use serde::Deserialize;

use crate::config::consts::SHIFT_CHARTS_URL;
use crate::core::net::{Encoding, Source};
use crate::engine::types::{Game, RawShift, ShiftRef};
use crate::error::Result;

const GOAL_MARKER: u32 = 505;

#[derive(Clone, Debug, Deserialize)]
struct ShiftCharts {
    #[serde(default)]
    data: Vec<ChartRow>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartRow {
    player_id: u64,
    #[serde(default)]
    team_id: u64,
    #[serde(default)]
    team_abbrev: String,
    period: u8,
    #[serde(default)]
    start_time: String,
    #[serde(default)]
    end_time: String,
    #[serde(default)]
    type_code: u32,
}

pub fn url(game_id: u64) -> String {
    SHIFT_CHARTS_URL.replace("{game_id}", &game_id.to_string())
}

pub fn fetch(source: &dyn Source, game: &Game) -> Result<Vec<RawShift>> {
    let body = source.get(&url(game.id), Encoding::Utf8)?;
    parse(&body, game)
}

pub fn parse(json: &str, game: &Game) -> Result<Vec<RawShift>> {
    let charts: ShiftCharts = serde_json::from_str(json)?;
    let mut out = Vec::with_capacity(charts.data.len());
    for row in charts.data {
        if row.type_code == GOAL_MARKER { continue; }
        let Some(side) = game.side_of(row.team_id).or_else(|| game.side_of_abbrev(&row.team_abbrev)) else {
            tracing::warn!("shift charts: player {} on unknown team {}", row.player_id, row.team_id);
            continue;
        };
        out.push(RawShift {
            player: ShiftRef::Id(row.player_id),
            side,
            period: row.period,
            start: row.start_time,
            end: row.end_time,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::{GameType, Side, TeamInfo};

    fn game() -> Game {
        Game {
            id: 2023020005,
            date: s!("2023-10-11"),
            season: 20232024,
            game_type: GameType::RegularSeason,
            venue: s!(),
            start_time_utc: s!(),
            home: TeamInfo { id: 8, abbrev: s!("MTL"), name: s!("Montréal Canadiens") },
            away: TeamInfo { id: 10, abbrev: s!("TOR"), name: s!("Toronto Maple Leafs") },
        }
    }

    #[test]
    fn skips_goal_markers_and_assigns_sides() {
        let json = r#"{"data": [
            {"playerId": 1, "teamId": 8, "teamAbbrev": "MTL", "period": 1, "startTime": "00:00", "endTime": "00:41", "typeCode": 517},
            {"playerId": 2, "teamId": 10, "teamAbbrev": "TOR", "period": 1, "startTime": "01:05", "endTime": "01:05", "typeCode": 505},
            {"playerId": 3, "teamId": 0, "teamAbbrev": "TOR ", "period": 2, "startTime": "00:10", "endTime": "00:50", "typeCode": 517},
            {"playerId": 4, "teamId": 99, "teamAbbrev": "XYZ", "period": 2, "startTime": "00:10", "endTime": "00:50", "typeCode": 517}
        ], "total": 4}"#;
        let shifts = parse(json, &game()).unwrap();
        assert_eq!(shifts.len(), 2);
        assert_eq!(shifts[0].player, ShiftRef::Id(1));
        assert_eq!(shifts[0].side, Side::Home);
        assert_eq!(shifts[1].side, Side::Away);
        assert_eq!(shifts[1].start, "00:10");
    }
}
