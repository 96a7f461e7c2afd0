// src/core/time.rs
//
// Game clock <-> one monotonic elapsed-seconds timeline per game.
// Elapsed seconds count from the start of period 1 and are the join key between
// events and shifts.
use crate::config::consts::{FIRST_SHOOTOUT_PERIOD, PERIOD_SECONDS};
use crate::error::{Result, ScrapeError};

/// `"M:SS"` / `"MM:SS"` to seconds.
pub fn clock_to_seconds(text: &str) -> Result<u32> {
    let bad = || ScrapeError::format("clock", text);
    let t = text.trim();
    let (m, s) = t.split_once(':').ok_or_else(bad)?;

    let digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    if !digits(m) || !digits(s) || m.len() > 2 || s.len() != 2 {
        return Err(bad());
    }
    let minutes: u32 = m.parse().map_err(|_| bad())?;
    let seconds: u32 = s.parse().map_err(|_| bad())?;
    if seconds >= 60 {
        return Err(bad());
    }
    Ok(minutes * 60 + seconds)
}

/// `(period - 1) * 1200 + clock`. Shootout periods (5+ outside the playoffs)
/// have no clock continuity and yield `None`, as does period 0.
pub fn elapsed_seconds(period: u8, clock_seconds: u32, playoffs: bool) -> Option<u32> {
    if period == 0 || (period >= FIRST_SHOOTOUT_PERIOD && !playoffs) {
        return None;
    }
    Some((period as u32 - 1) * PERIOD_SECONDS + clock_seconds)
}

/// Inverse of [`elapsed_seconds`]. 20:00 of period n is the same instant as
/// 0:00 of period n + 1 and comes back as the latter.
pub fn split_elapsed(elapsed: u32) -> (u8, u32) {
    ((elapsed / PERIOD_SECONDS + 1) as u8, elapsed % PERIOD_SECONDS)
}

/// Seconds to `"MM:SS"`.
pub fn seconds_to_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Period column of the HTML shift reports: a number, or `OT`.
pub fn parse_period(text: &str) -> Result<u8> {
    let t = text.trim();
    if t.eq_ignore_ascii_case("OT") {
        return Ok(4);
    }
    match t.parse::<u8>() {
        Ok(p) if p > 0 => Ok(p),
        _ => Err(ScrapeError::format("period", text)),
    }
}
