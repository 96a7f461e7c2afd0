// src/specs/shift_report.rs
//! Scraping spec for the TH (home) / TV (away) HTML shift reports.
//!
//! Layout the parser relies on:
//! - `<td class="teamHeading + border">` holds the team name.
//! - `<td class="playerHeading + border">` holds `"<number> <LAST>, <FIRST>"`.
//! - Each shift after a player heading is five `<td class="lborder + bborder">`
//!   cells: shift #, period, start, end, duration. Start and end read
//!   `"elapsed / remaining"`; only the elapsed half is kept.
//!
//! Class matches are exact, so the trailing event cell
//! (`lborder + bborder + rborder`) and the summary tables are ignored.
//! Sweater numbers are the only player key here; the engine resolves them.

use crate::config::consts::{SHIFT_REPORT_AWAY, SHIFT_REPORT_HOME, SHIFT_REPORT_URL};
use crate::core::html::elements;
use crate::core::net::{Encoding, Source};
use crate::core::time::parse_period;
use crate::engine::types::{RawShift, ReportPlayer, ShiftRef, Side};
use crate::error::{Result, ScrapeError};

const TEAM_HEADING: &str = "teamHeading + border";
const PLAYER_HEADING: &str = "playerHeading + border";
const SHIFT_CELL: &str = "lborder + bborder";
const CELLS_PER_SHIFT: usize = 5;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShiftReport {
    pub team_name: String,
    pub players: Vec<ReportPlayer>,
    pub shifts: Vec<RawShift>,
}

/// `http://www.nhl.com/scores/htmlreports/20232024/TH020005.HTM`
pub fn url(game_id: u64, side: Side) -> String {
    let id = game_id.to_string();
    let year: u32 = id.get(..4).and_then(|y| y.parse().ok()).unwrap_or_default();
    let season = format!("{year}{}", year + 1);
    let prefix = match side { Side::Home => SHIFT_REPORT_HOME, Side::Away => SHIFT_REPORT_AWAY };
    SHIFT_REPORT_URL
        .replace("{season}", &season)
        .replace("{prefix}", prefix)
        .replace("{suffix}", id.get(4..).unwrap_or_default())
}

pub fn fetch(source: &dyn Source, game_id: u64, side: Side) -> Result<ShiftReport> {
    let doc = source.get(&url(game_id, side), Encoding::Latin1)?;
    parse(&doc, side)
}

struct Pending {
    player: ReportPlayer,
    cells: Vec<String>,
}

pub fn parse(doc: &str, side: Side) -> Result<ShiftReport> {
    let mut report = ShiftReport::default();
    let mut current: Option<Pending> = None;
    let mut pending: Vec<Pending> = Vec::new();

    for td in elements(doc, "td") {
        let Some(class) = td.attr("class") else { continue };
        match class.trim() {
            TEAM_HEADING if report.team_name.is_empty() => report.team_name = td.text(),
            PLAYER_HEADING => {
                let text = td.text();
                // "Shift # / Per / ..." column captions share the class
                let Some(player) = parse_player_heading(&text, side) else { continue };
                if let Some(p) = current.replace(Pending { player, cells: Vec::new() }) {
                    pending.push(p);
                }
            }
            SHIFT_CELL => {
                if let Some(p) = current.as_mut() {
                    p.cells.push(td.text());
                }
            }
            _ => {}
        }
    }
    pending.extend(current);

    if pending.is_empty() {
        return Err(ScrapeError::format("shift report", "no player headings"));
    }

    for Pending { player, cells } in pending {
        if cells.len() % CELLS_PER_SHIFT != 0 {
            tracing::warn!(
                "shift report: #{} has {} trailing cells; ignored",
                player.sweater,
                cells.len() % CELLS_PER_SHIFT
            );
        }
        for group in cells.chunks_exact(CELLS_PER_SHIFT) {
            match shift_from_cells(group, &player) {
                Ok(shift) => report.shifts.push(shift),
                Err(e) => tracing::warn!("shift report: #{}: {e}", player.sweater),
            }
        }
        report.players.push(player);
    }
    Ok(report)
}

/// `"14 SUZUKI, NICK"`; last names may contain spaces (`"8 VAN RIEMSDYK, JAMES"`).
fn parse_player_heading(text: &str, side: Side) -> Option<ReportPlayer> {
    let (left, first) = text.split_once(',')?;
    let (number, last) = left.trim().split_once(' ')?;
    let sweater = number.trim().parse().ok()?;
    let name = join!(first.trim(), " ", last.trim());
    Some(ReportPlayer { side, sweater, name: s!(name.trim()) })
}

fn shift_from_cells(cells: &[String], player: &ReportPlayer) -> Result<RawShift> {
    let elapsed_half = |cell: &str| s!(cell.split(" / ").next().unwrap_or_default().trim());
    Ok(RawShift {
        player: ShiftRef::Sweater(player.sweater),
        side: player.side,
        period: parse_period(&cells[1])?,
        start: elapsed_half(&cells[2]),
        end: elapsed_half(&cells[3]),
    })
}
