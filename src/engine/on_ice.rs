// src/engine/on_ice.rs
//
// Joins the event table with the shift index on elapsed seconds.
use crate::config::consts::MAX_SKATERS;
use crate::engine::roster::PlayerTable;
use crate::engine::shifts::ShiftIndex;
use crate::engine::types::*;

/// One row per event, in event order. Anomalies become warnings; nothing here fails.
pub fn reconcile(
    events: Vec<Event>,
    index: &ShiftIndex,
    players: &PlayerTable,
    warnings: &mut Warnings,
) -> Vec<EventRow> {
    events
        .into_iter()
        .map(|event| {
            let Some(t) = event.elapsed else {
                warnings.push(Warning::MissingElapsed { event_id: event.event_id });
                return EventRow { event, home: None, away: None, strength: None };
            };
            let home = snapshot(index, players, Side::Home, t, event.event_id, warnings);
            let away = snapshot(index, players, Side::Away, t, event.event_id, warnings);
            let strength = game_strength(event.team, &home, &away);
            let strength = if strength.acting == 0 || strength.opposing == 0 {
                warnings.push(Warning::InvalidStrength {
                    event_id: event.event_id,
                    acting: strength.acting,
                    opposing: strength.opposing,
                });
                None
            } else {
                Some(strength)
            };
            EventRow { event, home: Some(home), away: Some(away), strength }
        })
        .collect()
}

/// Skaters of `side` on the ice at `t`, goalie split out. With several goalies on, the lowest id is in net.
pub fn snapshot(
    index: &ShiftIndex,
    players: &PlayerTable,
    side: Side,
    t: u32,
    event_id: u64,
    warnings: &mut Warnings,
) -> OnIce {
    let (goalies, skaters): (Vec<u64>, Vec<u64>) = index
        .on_ice_at(side, t)
        .into_iter()
        .partition(|&id| players.get(id).is_some_and(|p| p.position.is_goalie()));

    if skaters.len() > MAX_SKATERS {
        warnings.push(Warning::TooManySkaters { event_id, side, count: skaters.len() });
    }
    // ids ascend, so an overlap keeps the lowest
    let goalie = match goalies.as_slice() {
        [] => None,
        [g] => Some(*g),
        [g, ..] => {
            warnings.push(Warning::MultipleGoalies { event_id, side, count: goalies.len() });
            Some(*g)
        }
    };
    OnIce { skaters, goalie }
}

/// Skater counts from the acting team's side; home's when nobody acted.
pub fn game_strength(acting: Option<Side>, home: &OnIce, away: &OnIce) -> Strength {
    let (h, a) = (home.skaters.len(), away.skaters.len());
    match acting.unwrap_or(Side::Home) {
        Side::Home => Strength { acting: h, opposing: a },
        Side::Away => Strength { acting: a, opposing: h },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_ice(n: usize) -> OnIce {
        OnIce { skaters: (1..=n as u64).collect(), goalie: None }
    }

    #[test]
    fn strength_is_from_the_acting_side() {
        let (home, away) = (on_ice(5), on_ice(4));
        assert_eq!(game_strength(Some(Side::Home), &home, &away).to_string(), "5v4");
        assert_eq!(game_strength(Some(Side::Away), &home, &away).to_string(), "4v5");
        assert_eq!(game_strength(None, &home, &away).to_string(), "5v4");
    }
}
