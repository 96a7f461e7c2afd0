// src/specs/play_by_play.rs
//! Payload shapes for `/gamecenter/{id}/play-by-play`.
//!
//! Purpose:
//! - Deserialize game metadata, the ordered play list and the roster spots.
//! - Every detail field is optional; which ones appear depends on the play type.
//!
//! Responsibilities:
//! - Fetching through a `core::net::Source`.
//! - Nothing past deserialization. Clock strings stay strings here.

use serde::Deserialize;

use crate::config::consts::{API_BASE, PLAY_BY_PLAY_PATH};
use crate::core::net::{Encoding, Source};
use crate::error::Result;

/// `{ "default": "…" }` wrapper the API uses for every display string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Localized {
    #[serde(default)]
    pub default: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayByPlay {
    pub id: u64,
    #[serde(default)]
    pub season: u32,
    #[serde(default)]
    pub game_type: u8,
    #[serde(default)]
    pub game_date: String,
    #[serde(default)]
    pub venue: Localized,
    #[serde(rename = "startTimeUTC", default)]
    pub start_time_utc: String,
    pub home_team: Option<PlayTeam>,
    pub away_team: Option<PlayTeam>,
    #[serde(default)]
    pub plays: Vec<Play>,
    #[serde(default)]
    pub roster_spots: Vec<RosterSpot>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayTeam {
    pub id: u64,
    pub abbrev: String,
    pub name: Option<Localized>,
    pub place_name: Option<Localized>,
    pub common_name: Option<Localized>,
}

impl PlayTeam {
    /// `name` when present (older payloads), else `placeName commonName`.
    pub fn display_name(&self) -> String {
        if let Some(n) = self.name.as_ref().filter(|n| !n.default.is_empty()) {
            return n.default.clone();
        }
        let parts: Vec<&str> = [&self.place_name, &self.common_name]
            .into_iter()
            .flatten()
            .map(|l| l.default.trim())
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() { self.abbrev.clone() } else { parts.join(" ") }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Play {
    #[serde(default)]
    pub event_id: u64,
    pub period_descriptor: PeriodDescriptor,
    #[serde(default)]
    pub time_in_period: String,
    pub time_remaining: Option<String>,
    pub situation_code: Option<String>,
    pub home_team_defending_side: Option<String>,
    #[serde(default)]
    pub type_code: u32,
    #[serde(default)]
    pub type_desc_key: String,
    #[serde(default)]
    pub sort_order: u32,
    pub details: Option<PlayDetails>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodDescriptor {
    pub number: u8,
    #[serde(default)]
    pub period_type: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayDetails {
    pub x_coord: Option<i32>,
    pub y_coord: Option<i32>,
    pub zone_code: Option<String>,
    pub event_owner_team_id: Option<u64>,

    pub winning_player_id: Option<u64>,
    pub losing_player_id: Option<u64>,
    pub hitting_player_id: Option<u64>,
    pub hittee_player_id: Option<u64>,
    pub shooting_player_id: Option<u64>,
    pub goalie_in_net_id: Option<u64>,
    pub blocking_player_id: Option<u64>,
    pub player_id: Option<u64>,
    pub scoring_player_id: Option<u64>,
    pub assist1_player_id: Option<u64>,
    pub assist2_player_id: Option<u64>,
    pub committed_by_player_id: Option<u64>,
    pub drawn_by_player_id: Option<u64>,
    pub served_by_player_id: Option<u64>,

    pub shot_type: Option<String>,
    pub reason: Option<String>,
    pub secondary_reason: Option<String>,
    pub type_code: Option<String>,
    pub desc_key: Option<String>,
    pub duration: Option<u32>,

    pub away_score: Option<u32>,
    pub home_score: Option<u32>,
    #[serde(rename = "awaySOG")]
    pub away_sog: Option<u32>,
    #[serde(rename = "homeSOG")]
    pub home_sog: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterSpot {
    pub team_id: u64,
    pub player_id: u64,
    #[serde(default)]
    pub first_name: Localized,
    #[serde(default)]
    pub last_name: Localized,
    pub sweater_number: u32,
    #[serde(default)]
    pub position_code: String,
}

pub fn url(game_id: u64) -> String {
    join!(API_BASE, &PLAY_BY_PLAY_PATH.replace("{game_id}", &game_id.to_string()))
}

pub fn parse(json: &str) -> Result<PlayByPlay> {
    Ok(serde_json::from_str(json)?)
}

pub fn fetch(source: &dyn Source, game_id: u64) -> Result<PlayByPlay> {
    let body = source.get(&url(game_id), Encoding::Utf8)?;
    parse(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": 2023020005,
        "season": 20232024,
        "gameType": 2,
        "gameDate": "2023-10-11",
        "venue": {"default": "Bell Centre"},
        "startTimeUTC": "2023-10-11T23:00:00Z",
        "homeTeam": {"id": 8, "abbrev": "MTL", "placeName": {"default": "Montréal"}, "commonName": {"default": "Canadiens"}},
        "awayTeam": {"id": 10, "abbrev": "TOR", "name": {"default": "Maple Leafs"}},
        "plays": [
            {"eventId": 51, "periodDescriptor": {"number": 1, "periodType": "REG"},
             "timeInPeriod": "00:00", "timeRemaining": "20:00", "situationCode": "1551",
             "homeTeamDefendingSide": "left", "typeCode": 502, "typeDescKey": "faceoff", "sortOrder": 11,
             "details": {"eventOwnerTeamId": 8, "xCoord": 0, "yCoord": 0, "zoneCode": "N",
                         "winningPlayerId": 8480018, "losingPlayerId": 8478483}},
            {"eventId": 52, "periodDescriptor": {"number": 1, "periodType": "REG"},
             "timeInPeriod": "00:00", "typeCode": 520, "typeDescKey": "period-start", "sortOrder": 8}
        ],
        "rosterSpots": [
            {"teamId": 8, "playerId": 8480018, "firstName": {"default": "Nick"}, "lastName": {"default": "Suzuki"},
             "sweaterNumber": 14, "positionCode": "C"}
        ]
    }"#;

    #[test]
    fn parses_metadata_plays_and_roster() {
        let pbp = parse(SAMPLE).unwrap();
        assert_eq!(pbp.id, 2023020005);
        assert_eq!(pbp.venue.default, "Bell Centre");
        assert_eq!(pbp.home_team.as_ref().unwrap().display_name(), "Montréal Canadiens");
        assert_eq!(pbp.away_team.as_ref().unwrap().display_name(), "Maple Leafs");
        assert_eq!(pbp.plays.len(), 2);

        let fo = &pbp.plays[0];
        let d = fo.details.as_ref().unwrap();
        assert_eq!(d.winning_player_id, Some(8480018));
        assert_eq!(d.zone_code.as_deref(), Some("N"));
        assert!(pbp.plays[1].details.is_none());
        assert_eq!(pbp.roster_spots[0].last_name.default, "Suzuki");
    }

    #[test]
    fn url_uses_game_id() {
        assert_eq!(url(2023020005), "https://api-web.nhle.com/v1/gamecenter/2023020005/play-by-play");
    }
}
