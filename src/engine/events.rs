// src/engine/events.rs
//
// Raw plays -> uniform `Event`s: clock, roles, coordinates, running tally.
use crate::core::time::{clock_to_seconds, elapsed_seconds};
use crate::engine::types::*;
use crate::specs::play_by_play::{Play, PlayDetails};

/// Events in `(elapsed, sort order)` order, events without an elapsed time last.
/// Plays whose clock does not parse are skipped and reported.
pub fn normalize_events(game: &Game, plays: &[Play], warnings: &mut Warnings) -> Vec<Event> {
    let playoffs = game.game_type.is_playoffs();
    let no_details = PlayDetails::default();

    // the tally carries forward in source order
    let mut source: Vec<&Play> = plays.iter().collect();
    source.sort_by_key(|p| p.sort_order);

    let mut tally = Tally::default();
    let mut events = Vec::with_capacity(plays.len());

    for play in source {
        let clock = match clock_to_seconds(&play.time_in_period) {
            Ok(c) => c,
            Err(e) => {
                warnings.push(Warning::SkippedRecord {
                    what: "play",
                    detail: format!("event {}: {e}", play.event_id),
                });
                continue;
            }
        };
        let d = play.details.as_ref().unwrap_or(&no_details);
        let period = play.period_descriptor.number;
        let event_type = EventType::from_key(&play.type_desc_key);
        let team = d.event_owner_team_id.and_then(|id| game.side_of(id));
        let home_defending = play.home_team_defending_side.as_deref().and_then(DefendingSide::parse);
        let raw = match (d.x_coord, d.y_coord) {
            (Some(x), Some(y)) => Some(Coords { x, y }),
            _ => None,
        };

        tally = carry_tally(tally, d);

        events.push(Event {
            event_id: play.event_id,
            sort_order: play.sort_order,
            participants: participants(&event_type, d),
            event_type,
            period,
            period_type: play.period_descriptor.period_type.clone(),
            clock,
            time_remaining: play.time_remaining.as_deref().and_then(|t| clock_to_seconds(t).ok()),
            elapsed: elapsed_seconds(period, clock, playoffs),
            team,
            zone: d.zone_code.as_deref().and_then(Zone::from_code),
            home_defending,
            raw,
            norm: raw.map(|c| normalize_coords(c, home_defending, team)),
            goalie_in_net: d.goalie_in_net_id,
            shot_type: d.shot_type.clone(),
            reason: d.reason.clone(),
            secondary_reason: d.secondary_reason.clone(),
            penalty_key: d.desc_key.clone(),
            penalty_minutes: d.duration,
            situation_code: play.situation_code.clone(),
            tally,
        });
    }

    events.sort_by_key(|e| (e.elapsed.is_none(), e.elapsed, e.sort_order));
    events
}

/// Flip so the acting team attacks toward +x. Without a defending side or an
/// acting team there is nothing to flip against.
pub fn normalize_coords(raw: Coords, home_defending: Option<DefendingSide>, team: Option<Side>) -> NormCoords {
    let flip = matches!(
        (home_defending, team),
        (Some(DefendingSide::Right), Some(Side::Home)) | (Some(DefendingSide::Left), Some(Side::Away))
    );
    let (x, y) = if flip { (-raw.x, -raw.y) } else { (raw.x, raw.y) };
    NormCoords { x, y, vx: -y, vy: x }
}

/// Faceoffs with a known elapsed time, for shift classification.
pub fn faceoff_marks(events: &[Event]) -> Vec<FaceoffMark> {
    events
        .iter()
        .filter(|e| e.event_type == EventType::Faceoff)
        .filter_map(|e| {
            Some(FaceoffMark {
                elapsed: e.elapsed?,
                zone: e.zone,
                home_defending: e.home_defending,
                x: e.raw.map(|c| c.x),
            })
        })
        .collect()
}

fn carry_tally(prev: Tally, d: &PlayDetails) -> Tally {
    Tally {
        home_score: d.home_score.unwrap_or(prev.home_score),
        away_score: d.away_score.unwrap_or(prev.away_score),
        home_sog: d.home_sog.unwrap_or(prev.home_sog),
        away_sog: d.away_sog.unwrap_or(prev.away_sog),
    }
}

/// Player 1..3 of an event. Each role keeps its column even when an earlier
/// one is missing from the payload.
fn participants(kind: &EventType, d: &PlayDetails) -> Participants {
    use Role::*;
    let slots: [Option<(Role, Option<u64>)>; 3] = match kind {
        EventType::Faceoff => [Some((Winner, d.winning_player_id)), Some((Loser, d.losing_player_id)), None],
        EventType::Hit => [Some((Hitter, d.hitting_player_id)), Some((Hittee, d.hittee_player_id)), None],
        EventType::MissedShot | EventType::ShotOnGoal | EventType::FailedShotAttempt => {
            [Some((Shooter, d.shooting_player_id)), Some((GoalieInNet, d.goalie_in_net_id)), None]
        }
        EventType::BlockedShot => {
            [Some((Shooter, d.shooting_player_id)), Some((Blocker, d.blocking_player_id)), None]
        }
        EventType::Giveaway | EventType::Takeaway => [Some((Possessor, d.player_id)), None, None],
        EventType::Goal => [
            Some((Scorer, d.scoring_player_id)),
            Some((FirstAssist, d.assist1_player_id)),
            Some((SecondAssist, d.assist2_player_id)),
        ],
        EventType::Penalty => {
            let served = d.served_by_player_id.filter(|&id| Some(id) != d.committed_by_player_id);
            [
                Some((CommittedBy, d.committed_by_player_id)),
                Some((DrawnBy, d.drawn_by_player_id)),
                Some((ServedBy, served)),
            ]
        }
        EventType::Other(_) => [None; 3],
    };
    slots.map(|slot| {
        let (role, id) = slot?;
        id.map(|player_id| Participant { role, player_id })
    })
}
