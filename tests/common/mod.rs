// tests/common/mod.rs
//
// A small synthetic game: MTL (8) hosts TOR (10). Five skaters and a goalie
// a side, faceoff at 0, goal at 65, TOR penalty at 150, then play at 5v4.
#![allow(dead_code)]

use serde_json::{json, Value};

use nhl_scrape::engine::types::{RawShift, Side, ShiftRef};
use nhl_scrape::specs::play_by_play::{self, PlayByPlay};

pub const GAME_ID: u64 = 2023020005;
pub const HOME_ID: u64 = 8;
pub const AWAY_ID: u64 = 10;

// (player id, sweater, position)
pub const HOME: [(u64, u32, &str); 9] = [
    (101, 14, "C"), (102, 22, "L"), (103, 11, "R"), (104, 8, "D"), (105, 26, "D"),
    (130, 35, "G"), (106, 90, "C"), (107, 91, "L"), (131, 31, "G"),
];
pub const AWAY: [(u64, u32, &str); 6] = [
    (201, 34, "C"), (202, 16, "L"), (203, 88, "R"), (204, 44, "D"), (205, 2, "D"), (230, 60, "G"),
];

fn spot(team_id: u64, (id, sweater, pos): (u64, u32, &str)) -> Value {
    json!({
        "teamId": team_id,
        "playerId": id,
        "firstName": { "default": format!("First{id}") },
        "lastName": { "default": format!("Last{id}") },
        "sweaterNumber": sweater,
        "positionCode": pos,
    })
}

fn play(event_id: u64, sort: u32, key: &str, clock: &str, details: Value) -> Value {
    json!({
        "eventId": event_id,
        "periodDescriptor": { "number": 1, "periodType": "REG" },
        "timeInPeriod": clock,
        "timeRemaining": "",
        "situationCode": "1551",
        "homeTeamDefendingSide": "left",
        "typeCode": 500,
        "typeDescKey": key,
        "sortOrder": sort,
        "details": details,
    })
}

pub fn pbp_json(game_id: u64) -> String {
    let mut spots: Vec<Value> = HOME.iter().map(|&p| spot(HOME_ID, p)).collect();
    spots.extend(AWAY.iter().map(|&p| spot(AWAY_ID, p)));

    let plays = vec![
        play(1, 10, "faceoff", "00:00", json!({
            "eventOwnerTeamId": HOME_ID, "zoneCode": "N", "xCoord": 0, "yCoord": 0,
            "winningPlayerId": 101, "losingPlayerId": 201,
        })),
        play(2, 20, "goal", "01:05", json!({
            "eventOwnerTeamId": HOME_ID, "zoneCode": "O", "xCoord": 80, "yCoord": 10,
            "scoringPlayerId": 101, "assist1PlayerId": 102, "goalieInNetId": 230,
            "homeScore": 1, "awayScore": 0, "homeSOG": 1, "awaySOG": 0,
        })),
        play(3, 30, "penalty", "02:30", json!({
            "eventOwnerTeamId": AWAY_ID, "zoneCode": "D",
            "committedByPlayerId": 205, "drawnByPlayerId": 103,
            "descKey": "tripping", "duration": 2,
        })),
        play(4, 40, "shot-on-goal", "03:00", json!({
            "eventOwnerTeamId": HOME_ID, "zoneCode": "O", "xCoord": 60, "yCoord": -5,
            "shootingPlayerId": 104, "goalieInNetId": 230, "homeSOG": 2,
        })),
        play(5, 50, "takeaway", "03:10", json!({
            "eventOwnerTeamId": AWAY_ID, "zoneCode": "D", "playerId": 201,
        })),
    ];

    json!({
        "id": game_id,
        "season": 20232024,
        "gameType": 2,
        "gameDate": "2023-10-11",
        "venue": { "default": "Centre Bell" },
        "startTimeUTC": "2023-10-11T23:00:00Z",
        "homeTeam": { "id": HOME_ID, "abbrev": "MTL", "placeName": { "default": "Montréal" }, "commonName": { "default": "Canadiens" } },
        "awayTeam": { "id": AWAY_ID, "abbrev": "TOR", "placeName": { "default": "Toronto" }, "commonName": { "default": "Maple Leafs" } },
        "plays": plays,
        "rosterSpots": spots,
    })
    .to_string()
}

pub fn pbp() -> PlayByPlay {
    play_by_play::parse(&pbp_json(GAME_ID)).unwrap()
}

pub fn raw(side: Side, sweater: u32, start: &str, end: &str) -> RawShift {
    RawShift { player: ShiftRef::Sweater(sweater), side, period: 1, start: s(start), end: s(end) }
}

fn s(text: &str) -> String {
    text.to_string()
}

/// Everyone but the extra home forwards and backup goalie from the opening faceoff; TOR #2 off at 2:30.
pub fn raw_shifts() -> Vec<RawShift> {
    let mut out = Vec::new();
    for &(_, sweater, pos) in &HOME[..6] {
        let end = if pos == "G" { "20:00" } else { "04:00" };
        out.push(raw(Side::Home, sweater, "00:00", end));
    }
    for &(_, sweater, pos) in &AWAY {
        let end = match (pos, sweater) {
            ("G", _) => "20:00",
            (_, 2) => "02:30",
            _ => "04:00",
        };
        out.push(raw(Side::Away, sweater, "00:00", end));
    }
    out
}

/// The same shifts as a shift-chart payload.
pub fn shift_charts_json() -> String {
    let rows: Vec<Value> = raw_shifts()
        .iter()
        .map(|r| {
            let ShiftRef::Sweater(n) = r.player else { unreachable!() };
            let (team_id, abbrev, table): (u64, &str, &[(u64, u32, &str)]) = match r.side {
                Side::Home => (HOME_ID, "MTL", &HOME),
                Side::Away => (AWAY_ID, "TOR", &AWAY),
            };
            let id = table.iter().find(|p| p.1 == n).map(|p| p.0).unwrap();
            json!({
                "playerId": id, "teamId": team_id, "teamAbbrev": abbrev, "period": r.period,
                "startTime": r.start, "endTime": r.end, "typeCode": 517,
            })
        })
        .collect();
    json!({ "data": rows, "total": rows.len() }).to_string()
}
