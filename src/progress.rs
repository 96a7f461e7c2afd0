// src/progress.rs

/// Status sink for a batch of games. Every method defaults to a no-op so a
/// frontend only overrides what it shows.
pub trait Progress {
    /// Number of games about to be collected.
    fn begin(&mut self, _total: usize) {}

    fn log(&mut self, _msg: &str) {}

    /// One game fetched and reconciled.
    fn item_done(&mut self, _game_id: u64) {}

    /// One game failed; the batch carries on.
    fn item_failed(&mut self, _game_id: u64, _reason: &str) {}

    /// All games accounted for.
    fn finish(&mut self) {}
}

pub struct NullProgress;
impl Progress for NullProgress {}
