// src/specs/mod.rs
//! # Payload "specs" module
//!
//! One file per upstream endpoint. Each spec knows *where the data lives* in
//! one payload and how to read it into typed records.
//!
//! ## What lives here
//! - **serde shapes** for the JSON endpoints (play-by-play, shift charts, schedule).
//! - **Tolerant HTML scanning** for the TH/TV shift reports, using `core::html`.
//! - URL builders for each endpoint, and a `fetch` that goes through `core::net::Source`.
//!
//! ## What does **not** live here
//! - Time conversion, name resolution, classification. That is `engine`.
//! - Caching (`core::net::CachedSource`) and batching (`scrape`).
//!
//! ## Typical call chain
//! ```text
//! scrape::collect_game → specs::<payload>::fetch(source, …)
//!                      ↘ engine::reconcile_game(pbp, report players, raw shifts)
//! ```
//!
//! ## Testing notes
//! Every spec is tested offline against a small inline fixture.
pub mod play_by_play;
pub mod schedule;
pub mod shift_charts;
pub mod shift_report;
