// src/engine/types.rs
use std::fmt;
use std::str::FromStr;

use crate::error::ScrapeError;

/* ---------------- Game ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side { Home, Away }

impl Side {
    pub const BOTH: [Side; 2] = [Side::Home, Side::Away];

    pub fn as_str(self) -> &'static str {
        match self { Side::Home => "home", Side::Away => "away" }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(Side::Home),
            "away" => Ok(Side::Away),
            other => Err(ScrapeError::InvalidArgument(format!("side must be home or away, got {other:?}"))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameType { Preseason, RegularSeason, Playoffs }

impl GameType {
    /// API `gameType`: 1 preseason, 2 regular season, anything else playoffs.
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => GameType::Preseason,
            2 => GameType::RegularSeason,
            _ => GameType::Playoffs,
        }
    }

    pub fn is_playoffs(self) -> bool { self == GameType::Playoffs }

    pub fn as_str(self) -> &'static str {
        match self {
            GameType::Preseason => "preseason",
            GameType::RegularSeason => "regular-season",
            GameType::Playoffs => "playoffs",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamInfo {
    pub id: u64,
    pub abbrev: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    pub id: u64,
    pub date: String,
    pub season: u32,
    pub game_type: GameType,
    pub venue: String,
    pub start_time_utc: String,
    pub home: TeamInfo,
    pub away: TeamInfo,
}

impl Game {
    pub fn team(&self, side: Side) -> &TeamInfo {
        match side { Side::Home => &self.home, Side::Away => &self.away }
    }

    pub fn side_of(&self, team_id: u64) -> Option<Side> {
        if team_id == self.home.id { Some(Side::Home) }
        else if team_id == self.away.id { Some(Side::Away) }
        else { None }
    }

    pub fn side_of_abbrev(&self, abbrev: &str) -> Option<Side> {
        let a = abbrev.trim();
        if a.eq_ignore_ascii_case(&self.home.abbrev) { Some(Side::Home) }
        else if a.eq_ignore_ascii_case(&self.away.abbrev) { Some(Side::Away) }
        else { None }
    }
}

/* ---------------- Players ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position { Center, LeftWing, RightWing, Defense, Goalie, Unknown }

impl Position {
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "C" => Position::Center,
            "L" => Position::LeftWing,
            "R" => Position::RightWing,
            "D" => Position::Defense,
            "G" => Position::Goalie,
            _ => Position::Unknown,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Position::Center => "C",
            Position::LeftWing => "L",
            Position::RightWing => "R",
            Position::Defense => "D",
            Position::Goalie => "G",
            Position::Unknown => "",
        }
    }

    pub fn is_goalie(self) -> bool { self == Position::Goalie }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub id: u64,
    pub sweater: u32,
    pub side: Side,
    pub team_abbrev: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub position: Position,
    /// Name as printed on the HTML shift report, when one was merged in.
    pub report_name: Option<String>,
}

/// A player heading from an HTML shift report. No numeric id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportPlayer {
    pub side: Side,
    pub sweater: u32,
    pub name: String,
}

/* ---------------- Shifts ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DefendingSide { Left, Right }

impl DefendingSide {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Some(DefendingSide::Left),
            "right" => Some(DefendingSide::Right),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self { DefendingSide::Left => "left", DefendingSide::Right => "right" }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Zone { Offensive, Defensive, Neutral }

impl Zone {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "O" => Some(Zone::Offensive),
            "D" => Some(Zone::Defensive),
            "N" => Some(Zone::Neutral),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self { Zone::Offensive => "O", Zone::Defensive => "D", Zone::Neutral => "N" }
    }
}

/// How a shift began.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartType {
    /// Neutral-zone faceoff
    Nzf,
    /// Offensive-zone faceoff, relative to the shift's team
    Ozf,
    /// Defensive-zone faceoff, relative to the shift's team
    Dzf,
    /// On the fly
    Otf,
}

impl fmt::Display for StartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StartType::Nzf => "NZF",
            StartType::Ozf => "OZF",
            StartType::Dzf => "DZF",
            StartType::Otf => "OTF",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShiftRef {
    /// Shift-chart rows carry the player id.
    Id(u64),
    /// HTML report rows only carry the sweater number.
    Sweater(u32),
}

/// One shift as read from a source, before any conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawShift {
    pub player: ShiftRef,
    pub side: Side,
    pub period: u8,
    /// Elapsed-in-period clock, `M:SS`.
    pub start: String,
    pub end: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shift {
    /// `None` when the sweater number did not resolve.
    pub player_id: Option<u64>,
    pub side: Side,
    pub sweater: Option<u32>,
    pub period: u8,
    /// Elapsed seconds; `end > start`.
    pub start: u32,
    pub end: u32,
    pub start_type: StartType,
}

impl Shift {
    pub fn duration(&self) -> u32 { self.end - self.start }
}

/// The faceoff facts shift classification needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceoffMark {
    pub elapsed: u32,
    pub zone: Option<Zone>,
    pub home_defending: Option<DefendingSide>,
    pub x: Option<i32>,
}

/* ---------------- Events ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventType {
    Faceoff,
    Hit,
    MissedShot,
    ShotOnGoal,
    BlockedShot,
    FailedShotAttempt,
    Giveaway,
    Takeaway,
    Goal,
    Penalty,
    Other(String),
}

impl EventType {
    /// From the API `typeDescKey`.
    pub fn from_key(key: &str) -> Self {
        match key {
            "faceoff" => EventType::Faceoff,
            "hit" => EventType::Hit,
            "missed-shot" => EventType::MissedShot,
            "shot-on-goal" => EventType::ShotOnGoal,
            "blocked-shot" => EventType::BlockedShot,
            "failed-shot-attempt" => EventType::FailedShotAttempt,
            "giveaway" => EventType::Giveaway,
            "takeaway" => EventType::Takeaway,
            "goal" => EventType::Goal,
            "penalty" => EventType::Penalty,
            other => EventType::Other(s!(other)),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            EventType::Faceoff => "faceoff",
            EventType::Hit => "hit",
            EventType::MissedShot => "missed-shot",
            EventType::ShotOnGoal => "shot-on-goal",
            EventType::BlockedShot => "blocked-shot",
            EventType::FailedShotAttempt => "failed-shot-attempt",
            EventType::Giveaway => "giveaway",
            EventType::Takeaway => "takeaway",
            EventType::Goal => "goal",
            EventType::Penalty => "penalty",
            EventType::Other(k) => k,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Winner,
    Loser,
    Hitter,
    Hittee,
    Shooter,
    GoalieInNet,
    Blocker,
    Possessor,
    Scorer,
    FirstAssist,
    SecondAssist,
    CommittedBy,
    DrawnBy,
    ServedBy,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Winner => "winner",
            Role::Loser => "loser",
            Role::Hitter => "hitter",
            Role::Hittee => "hittee",
            Role::Shooter => "shooter",
            Role::GoalieInNet => "goalie",
            Role::Blocker => "blocker",
            Role::Possessor => "possessor",
            Role::Scorer => "scorer",
            Role::FirstAssist => "assist1",
            Role::SecondAssist => "assist2",
            Role::CommittedBy => "committed_by",
            Role::DrawnBy => "drawn_by",
            Role::ServedBy => "served_by",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Participant {
    pub role: Role,
    pub player_id: u64,
}

pub type Participants = [Option<Participant>; 3];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Coords {
    pub x: i32,
    pub y: i32,
}

/// Acting team always attacks toward +x; `vx`/`vy` is the same point on a
/// vertical rink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NormCoords {
    pub x: i32,
    pub y: i32,
    pub vx: i32,
    pub vy: i32,
}

/// Running score and shots on goal as of an event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub home_score: u32,
    pub away_score: u32,
    pub home_sog: u32,
    pub away_sog: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub event_id: u64,
    pub sort_order: u32,
    pub event_type: EventType,
    pub period: u8,
    pub period_type: String,
    /// Seconds into the period.
    pub clock: u32,
    pub time_remaining: Option<u32>,
    /// `None` for shootout rounds.
    pub elapsed: Option<u32>,
    pub team: Option<Side>,
    pub zone: Option<Zone>,
    pub home_defending: Option<DefendingSide>,
    pub raw: Option<Coords>,
    pub norm: Option<NormCoords>,
    /// Player 1..3 in the fixed order of the event type; a missing role leaves its slot empty.
    pub participants: Participants,
    pub goalie_in_net: Option<u64>,
    pub shot_type: Option<String>,
    pub reason: Option<String>,
    pub secondary_reason: Option<String>,
    pub penalty_key: Option<String>,
    pub penalty_minutes: Option<u32>,
    pub situation_code: Option<String>,
    pub tally: Tally,
}

impl Event {
    pub fn player(&self, role: Role) -> Option<u64> {
        self.participants.iter().flatten().find(|p| p.role == role).map(|p| p.player_id)
    }
}

/* ---------------- Reconciled output ---------------- */

/// Who was on the ice for one side at one instant. Skaters by ascending id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OnIce {
    pub skaters: Vec<u64>,
    pub goalie: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Strength {
    pub acting: usize,
    pub opposing: usize,
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.acting, self.opposing)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventRow {
    pub event: Event,
    pub home: Option<OnIce>,
    pub away: Option<OnIce>,
    pub strength: Option<Strength>,
}

impl EventRow {
    pub fn on_ice(&self, side: Side) -> Option<&OnIce> {
        match side { Side::Home => self.home.as_ref(), Side::Away => self.away.as_ref() }
    }
}

/* ---------------- Warnings ---------------- */

/// Non-fatal data-quality finding attached to a game report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Warning {
    SkippedRecord { what: &'static str, detail: String },
    UnknownTeam { team_id: u64 },
    DroppedReportPlayer { side: Side, sweater: u32, name: String },
    UnresolvedShift { side: Side, sweater: u32 },
    /// Id-keyed shifts for a player the roster does not list; counted as a skater.
    UnrosteredPlayer { side: Side, player_id: u64 },
    OverlappingShift { player_id: u64, start: u32, end: u32 },
    MissingElapsed { event_id: u64 },
    TooManySkaters { event_id: u64, side: Side, count: usize },
    MultipleGoalies { event_id: u64, side: Side, count: usize },
    InvalidStrength { event_id: u64, acting: usize, opposing: usize },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::SkippedRecord { what, detail } => write!(f, "skipped {what}: {detail}"),
            Warning::UnknownTeam { team_id } => write!(f, "roster entry for unknown team id {team_id}"),
            Warning::DroppedReportPlayer { side, sweater, name } =>
                write!(f, "{side} report player #{sweater} {name} has no roster entry"),
            Warning::UnresolvedShift { side, sweater } =>
                write!(f, "{side} shift for #{sweater} does not resolve to a player"),
            Warning::UnrosteredPlayer { side, player_id } =>
                write!(f, "{side} player {player_id} has shifts but no roster entry; counted as a skater"),
            Warning::OverlappingShift { player_id, start, end } =>
                write!(f, "player {player_id} shift [{start}, {end}) overlaps the previous one; merged"),
            Warning::MissingElapsed { event_id } => write!(f, "event {event_id} has no elapsed time"),
            Warning::TooManySkaters { event_id, side, count } =>
                write!(f, "event {event_id}: {count} {side} skaters on ice"),
            Warning::MultipleGoalies { event_id, side, count } =>
                write!(f, "event {event_id}: {count} {side} goalies on ice"),
            Warning::InvalidStrength { event_id, acting, opposing } =>
                write!(f, "event {event_id}: invalid strength {acting}v{opposing}"),
        }
    }
}

/// Collects warnings for one game; every push is logged.
#[derive(Clone, Debug, Default)]
pub struct Warnings(Vec<Warning>);

impl Warnings {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, w: Warning) {
        tracing::warn!("{w}");
        self.0.push(w);
    }

    pub fn as_slice(&self) -> &[Warning] { &self.0 }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn into_vec(self) -> Vec<Warning> { self.0 }
}
