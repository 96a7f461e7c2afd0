// src/specs/schedule.rs
//! Club schedule (`/club-schedule-season/{team}/{season}`), used to turn a
//! team + season into the list of game ids worth scraping.

use serde::Deserialize;

use crate::config::consts::{API_BASE, SCHEDULE_PATH};
use crate::core::net::{Encoding, Source};
use crate::error::Result;

#[derive(Clone, Debug, Deserialize)]
struct Schedule {
    #[serde(default)]
    games: Vec<ScheduledGame>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledGame {
    pub id: u64,
    #[serde(default)]
    pub game_type: u8,
    #[serde(default)]
    pub game_date: String,
    #[serde(default)]
    pub game_state: String,
    pub home_team: ScheduleTeam,
    pub away_team: ScheduleTeam,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ScheduleTeam {
    pub abbrev: String,
}

impl ScheduledGame {
    /// Only finished games have complete play-by-play and shift data.
    pub fn is_finished(&self) -> bool {
        matches!(self.game_state.as_str(), "OFF" | "FINAL")
    }
}

pub fn url(team: &str, season: u32) -> String {
    let path = SCHEDULE_PATH
        .replace("{team}", &team.trim().to_ascii_uppercase())
        .replace("{season}", &season.to_string());
    join!(API_BASE, &path)
}

pub fn parse(json: &str) -> Result<Vec<ScheduledGame>> {
    let schedule: Schedule = serde_json::from_str(json)?;
    Ok(schedule.games)
}

pub fn fetch(source: &dyn Source, team: &str, season: u32) -> Result<Vec<ScheduledGame>> {
    let body = source.get(&url(team, season), Encoding::Utf8)?;
    parse(&body)
}
