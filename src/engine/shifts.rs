// src/engine/shifts.rs
//
// Interval index: per side, per player, sorted non-overlapping `[start, end)`
// intervals in elapsed seconds.
use std::collections::{BTreeMap, HashMap};

use crate::core::time::{clock_to_seconds, elapsed_seconds};
use crate::engine::roster::PlayerTable;
use crate::engine::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interval {
    pub start: u32,
    pub end: u32,
}

impl Interval {
    /// Half-open `[start, end)`: off at `end`, the replacement is on.
    pub fn contains(&self, t: u32) -> bool {
        self.start <= t && t < self.end
    }
}

#[derive(Clone, Debug, Default)]
pub struct ShiftIndex {
    /// Resolved and unresolved shifts, by start time.
    shifts: Vec<Shift>,
    home: BTreeMap<u64, Vec<Interval>>,
    away: BTreeMap<u64, Vec<Interval>>,
}

/// Start type of a shift owned by `owner` that began at `mark`'s faceoff,
/// or on the fly when there is no faceoff at that second.
pub fn classify_start(mark: Option<&FaceoffMark>, owner: Side) -> StartType {
    let Some(mark) = mark else { return StartType::Otf };
    if mark.zone == Some(Zone::Neutral) {
        return StartType::Nzf;
    }
    let (Some(home_defends), Some(x)) = (mark.home_defending, mark.x) else {
        return StartType::Otf;
    };
    if x == 0 {
        return StartType::Otf;
    }
    let owner_defends_left = (home_defends == DefendingSide::Left) == (owner == Side::Home);
    let on_left = x < 0;
    if on_left == owner_defends_left { StartType::Dzf } else { StartType::Ozf }
}

impl ShiftIndex {
    pub fn build(
        raw: &[RawShift],
        players: &PlayerTable,
        faceoffs: &[FaceoffMark],
        game_type: GameType,
        warnings: &mut Warnings,
    ) -> Self {
        // first faceoff at a given second wins
        let mut marks: HashMap<u32, &FaceoffMark> = HashMap::new();
        for m in faceoffs {
            marks.entry(m.elapsed).or_insert(m);
        }

        let mut unresolved = Vec::new();
        let mut per_player: BTreeMap<u64, Vec<Shift>> = BTreeMap::new();

        for r in raw {
            let Some((start, end)) = convert(r, game_type, warnings) else { continue };

            let (player_id, sweater) = match r.player {
                ShiftRef::Id(id) => (Some(id), players.get(id).map(|p| p.sweater)),
                ShiftRef::Sweater(n) => {
                    let id = players.resolve(r.side, n);
                    if id.is_none() {
                        warnings.push(Warning::UnresolvedShift { side: r.side, sweater: n });
                    }
                    (id, Some(n))
                }
            };
            let shift = Shift {
                player_id,
                side: r.side,
                sweater,
                period: r.period,
                start,
                end,
                start_type: classify_start(marks.get(&start).copied(), r.side),
            };
            match player_id {
                Some(id) => per_player.entry(id).or_default().push(shift),
                None => unresolved.push(shift),
            }
        }

        let mut index = ShiftIndex::default();
        for (id, mut list) in per_player {
            if players.get(id).is_none() {
                if let Some(side) = list.first().map(|s| s.side) {
                    warnings.push(Warning::UnrosteredPlayer { side, player_id: id });
                }
            }
            list.sort_by_key(|s| (s.start, s.end));
            let merged = merge_overlaps(id, list, warnings);
            let Some(side) = merged.first().map(|s| s.side) else { continue };

            let intervals = merged.iter().map(|s| Interval { start: s.start, end: s.end }).collect();
            match side {
                Side::Home => index.home.insert(id, intervals),
                Side::Away => index.away.insert(id, intervals),
            };
            index.shifts.extend(merged);
        }
        index.shifts.extend(unresolved);
        index.shifts.sort_by_key(|s| (s.start, s.side, s.player_id));

        tracing::debug!(
            shifts = index.shifts.len(),
            home = index.home.len(),
            away = index.away.len(),
            "shift index built"
        );
        index
    }

    /// Players of `side` with an interval containing `t`, by ascending id.
    pub fn on_ice_at(&self, side: Side, t: u32) -> Vec<u64> {
        self.side(side)
            .iter()
            .filter(|(_, ivs)| {
                let i = ivs.partition_point(|iv| iv.start <= t);
                i > 0 && ivs[i - 1].contains(t)
            })
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    pub fn player_intervals(&self, side: Side, player_id: u64) -> &[Interval] {
        self.side(side).get(&player_id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn unresolved(&self) -> impl Iterator<Item = &Shift> {
        self.shifts.iter().filter(|s| s.player_id.is_none())
    }

    fn side(&self, side: Side) -> &BTreeMap<u64, Vec<Interval>> {
        match side { Side::Home => &self.home, Side::Away => &self.away }
    }
}

/// Clock strings to elapsed `(start, end)`. Bad clocks and reversed shifts are
/// reported; zero-length shifts just vanish.
fn convert(r: &RawShift, game_type: GameType, warnings: &mut Warnings) -> Option<(u32, u32)> {
    let skip = |warnings: &mut Warnings, detail: String| {
        warnings.push(Warning::SkippedRecord { what: "shift", detail });
    };
    let (start, end) = match (clock_to_seconds(&r.start), clock_to_seconds(&r.end)) {
        (Ok(s), Ok(e)) => (s, e),
        (Err(e), _) | (_, Err(e)) => {
            skip(warnings, format!("{} {:?}: {e}", r.side, r.player));
            return None;
        }
    };
    let playoffs = game_type.is_playoffs();
    let (Some(start), Some(end)) = (
        elapsed_seconds(r.period, start, playoffs),
        elapsed_seconds(r.period, end, playoffs),
    ) else {
        skip(warnings, format!("{} {:?}: no elapsed time in period {}", r.side, r.player, r.period));
        return None;
    };
    if end < start {
        skip(warnings, format!("{} {:?}: ends at {end} before it starts at {start}", r.side, r.player));
        return None;
    }
    if end == start {
        return None;
    }
    Some((start, end))
}

/// `list` is sorted by start. Overlapping neighbours fold into one shift.
fn merge_overlaps(player_id: u64, list: Vec<Shift>, warnings: &mut Warnings) -> Vec<Shift> {
    let mut out: Vec<Shift> = Vec::with_capacity(list.len());
    for shift in list {
        match out.last_mut() {
            Some(prev) if shift.start < prev.end => {
                warnings.push(Warning::OverlappingShift { player_id, start: shift.start, end: shift.end });
                prev.end = prev.end.max(shift.end);
            }
            _ => out.push(shift),
        }
    }
    out
}
