// benches/reconcile.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use nhl_scrape::engine::types::{RawShift, ShiftRef, Side, Warnings};
use nhl_scrape::engine::{reconcile_game, ShiftIndex};
use nhl_scrape::specs::play_by_play::{self, PlayByPlay};

const HOME_ID: u64 = 8;
const AWAY_ID: u64 = 10;

/// A full 60 minutes: 18 skaters and a goalie a side rotating on 45 s
/// shifts, one play every 10 s.
fn synthetic_game() -> (PlayByPlay, Vec<RawShift>) {
    let mut spots = Vec::new();
    for (team, base) in [(HOME_ID, 100u64), (AWAY_ID, 200u64)] {
        for n in 0..19u64 {
            let pos = if n == 18 { "G" } else if n < 12 { "C" } else { "D" };
            spots.push(format!(
                r#"{{"teamId":{team},"playerId":{},"firstName":{{"default":"P"}},"lastName":{{"default":"{n}"}},"sweaterNumber":{},"positionCode":"{pos}"}}"#,
                base + n,
                n + 1
            ));
        }
    }

    let mut plays = Vec::new();
    for i in 0..360u32 {
        let t = i * 10;
        let (period, clock) = (t / 1200 + 1, t % 1200);
        let owner = if i % 2 == 0 { HOME_ID } else { AWAY_ID };
        let key = if i % 15 == 0 { "faceoff" } else { "shot-on-goal" };
        plays.push(format!(
            r#"{{"eventId":{i},"periodDescriptor":{{"number":{period},"periodType":"REG"}},"timeInPeriod":"{:02}:{:02}","homeTeamDefendingSide":"left","typeDescKey":"{key}","sortOrder":{i},"details":{{"eventOwnerTeamId":{owner},"xCoord":{},"yCoord":5,"zoneCode":"O","shootingPlayerId":101,"winningPlayerId":101,"losingPlayerId":201}}}}"#,
            clock / 60,
            clock % 60,
            (i as i32 % 180) - 90,
        ));
    }

    let json = format!(
        r#"{{"id":2023020005,"season":20232024,"gameType":2,"homeTeam":{{"id":{HOME_ID},"abbrev":"MTL"}},"awayTeam":{{"id":{AWAY_ID},"abbrev":"TOR"}},"plays":[{}],"rosterSpots":[{}]}}"#,
        plays.join(","),
        spots.join(",")
    );
    let pbp = play_by_play::parse(&json).expect("synthetic play-by-play");

    let clock = |s: u32| format!("{:02}:{:02}", s / 60, s % 60);
    let mut shifts = Vec::new();
    for side in Side::BOTH {
        for period in 1..=3u8 {
            shifts.push(RawShift {
                player: ShiftRef::Sweater(19),
                side,
                period,
                start: clock(0),
                end: clock(1200),
            });
            let mut start = 0;
            let mut line = 0u32;
            while start < 1200 {
                let end = (start + 45).min(1200);
                for k in 0..5 {
                    shifts.push(RawShift {
                        player: ShiftRef::Sweater((line * 5 + k) % 18 + 1),
                        side,
                        period,
                        start: clock(start),
                        end: clock(end),
                    });
                }
                line += 1;
                start = end;
            }
        }
    }
    (pbp, shifts)
}

fn bench_reconcile(c: &mut Criterion) {
    let (pbp, shifts) = synthetic_game();

    c.bench_function("reconcile_game", |b| {
        b.iter(|| {
            let report = reconcile_game(black_box(&pbp), &[], black_box(&shifts)).expect("reconcile");
            black_box(report.rows.len())
        })
    });

    let report = reconcile_game(&pbp, &[], &shifts).expect("reconcile");
    let index = ShiftIndex::build(&shifts, &report.players, &[], report.game.game_type, &mut Warnings::new());
    c.bench_function("on_ice_at", |b| {
        b.iter(|| {
            (0..3600).step_by(7).map(|t| index.on_ice_at(Side::Home, black_box(t)).len()).sum::<usize>()
        })
    });
}

criterion_group!(benches, bench_reconcile);
criterion_main!(benches);
