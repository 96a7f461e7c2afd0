// src/scrape/mod.rs
mod scrape;
pub use scrape::BatchSummary;
pub use scrape::default_source;
pub use scrape::resolve_game_ids;
pub use scrape::collect_game;
pub use scrape::collect_games;
