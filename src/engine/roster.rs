// src/engine/roster.rs
//
// Player table for one game. Keyed by numeric id; sweater numbers are only
// looked up together with the side they belong to.
use std::collections::{BTreeMap, HashMap};

use crate::engine::types::{Game, Player, Position, ReportPlayer, Side, Warning, Warnings};
use crate::error::Result;
use crate::specs::play_by_play::RosterSpot;

#[derive(Clone, Debug, Default)]
pub struct PlayerTable {
    by_id: BTreeMap<u64, Player>,
    by_sweater: HashMap<(Side, u32), u64>,
}

impl PlayerTable {
    /// API roster spots first, then HTML report players merged on
    /// `(side, sweater)`. Report players that match nobody are dropped.
    pub fn build(
        game: &Game,
        spots: &[RosterSpot],
        report_players: &[ReportPlayer],
        warnings: &mut Warnings,
    ) -> Self {
        let mut table = PlayerTable::default();

        for spot in spots {
            let Some(side) = game.side_of(spot.team_id) else {
                warnings.push(Warning::UnknownTeam { team_id: spot.team_id });
                continue;
            };
            let key = (side, spot.sweater_number);
            if let Some(&other) = table.by_sweater.get(&key) {
                if other != spot.player_id {
                    warnings.push(Warning::SkippedRecord {
                        what: "roster spot",
                        detail: format!("{side} #{} already belongs to {other}", spot.sweater_number),
                    });
                }
                continue;
            }

            let first = s!(spot.first_name.default.trim());
            let last = s!(spot.last_name.default.trim());
            let full_name = s!(join!(&first, " ", &last).trim());
            table.by_sweater.insert(key, spot.player_id);
            table.by_id.insert(spot.player_id, Player {
                id: spot.player_id,
                sweater: spot.sweater_number,
                side,
                team_abbrev: game.team(side).abbrev.clone(),
                first_name: first,
                last_name: last,
                full_name,
                position: Position::from_code(&spot.position_code),
                report_name: None,
            });
        }

        for rp in report_players {
            let matched = table
                .resolve(rp.side, rp.sweater)
                .and_then(|id| table.by_id.get_mut(&id));
            match matched {
                Some(player) => player.report_name = Some(rp.name.clone()),
                None => warnings.push(Warning::DroppedReportPlayer {
                    side: rp.side,
                    sweater: rp.sweater,
                    name: rp.name.clone(),
                }),
            }
        }

        tracing::debug!(game = game.id, players = table.by_id.len(), "player table built");
        table
    }

    pub fn get(&self, id: u64) -> Option<&Player> {
        self.by_id.get(&id)
    }

    pub fn resolve(&self, side: Side, sweater: u32) -> Option<u64> {
        self.by_sweater.get(&(side, sweater)).copied()
    }

    /// Ascending id.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.by_id.values()
    }

    /// `None` for everyone, or `"home"` / `"away"`.
    pub fn filter_side(&self, side: Option<&str>) -> Result<Vec<&Player>> {
        let wanted = side.map(str::parse::<Side>).transpose()?;
        Ok(self
            .players()
            .filter(|p| wanted.is_none_or(|s| p.side == s))
            .collect())
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::{GameType, TeamInfo};
    use crate::error::ScrapeError;
    use crate::specs::play_by_play::Localized;

    fn game() -> Game {
        Game {
            id: 1,
            date: s!(),
            season: 20232024,
            game_type: GameType::RegularSeason,
            venue: s!(),
            start_time_utc: s!(),
            home: TeamInfo { id: 8, abbrev: s!("MTL"), name: s!() },
            away: TeamInfo { id: 10, abbrev: s!("TOR"), name: s!() },
        }
    }

    fn spot(team_id: u64, player_id: u64, sweater: u32, first: &str, last: &str, pos: &str) -> RosterSpot {
        RosterSpot {
            team_id,
            player_id,
            first_name: Localized { default: s!(first) },
            last_name: Localized { default: s!(last) },
            sweater_number: sweater,
            position_code: s!(pos),
        }
    }

    #[test]
    fn same_sweater_on_both_sides_resolves_separately() {
        let spots = vec![
            spot(8, 100, 14, "Nick", "Suzuki", "C"),
            spot(10, 200, 14, "Tyler", "Bertuzzi", "L"),
            spot(10, 201, 35, "Ilya", "Samsonov ", "G"),
        ];
        let mut w = Warnings::new();
        let table = PlayerTable::build(&game(), &spots, &[], &mut w);

        assert!(w.is_empty());
        assert_eq!(table.resolve(Side::Home, 14), Some(100));
        assert_eq!(table.resolve(Side::Away, 14), Some(200));
        assert_eq!(table.resolve(Side::Home, 35), None);
        assert_eq!(table.get(201).unwrap().full_name, "Ilya Samsonov");
        assert!(table.get(201).unwrap().position.is_goalie());
    }

    #[test]
    fn report_players_merge_or_drop() {
        let spots = vec![spot(8, 100, 14, "Nick", "Suzuki", "C"), spot(99, 300, 1, "A", "B", "C")];
        let report = vec![
            ReportPlayer { side: Side::Home, sweater: 14, name: s!("NICK SUZUKI") },
            ReportPlayer { side: Side::Home, sweater: 91, name: s!("GHOST PLAYER") },
        ];
        let mut w = Warnings::new();
        let table = PlayerTable::build(&game(), &spots, &report, &mut w);

        assert_eq!(table.get(100).unwrap().report_name.as_deref(), Some("NICK SUZUKI"));
        assert_eq!(table.len(), 1);
        assert_eq!(
            w.as_slice(),
            &[
                Warning::UnknownTeam { team_id: 99 },
                Warning::DroppedReportPlayer { side: Side::Home, sweater: 91, name: s!("GHOST PLAYER") },
            ]
        );
    }

    #[test]
    fn side_filter() {
        let spots = vec![spot(8, 100, 14, "Nick", "Suzuki", "C"), spot(10, 200, 14, "Tyler", "Bertuzzi", "L")];
        let table = PlayerTable::build(&game(), &spots, &[], &mut Warnings::new());

        assert_eq!(table.filter_side(None).unwrap().len(), 2);
        let away = table.filter_side(Some("AWAY")).unwrap();
        assert_eq!(away.iter().map(|p| p.id).collect::<Vec<_>>(), vec![200]);
        assert!(matches!(table.filter_side(Some("both")), Err(ScrapeError::InvalidArgument(_))));
    }
}
