// src/engine/mod.rs
//! Reconciliation core. Pure and synchronous: payloads in, one `GameReport` out.
pub mod engine;
pub mod events;
pub mod on_ice;
pub mod roster;
pub mod shifts;
pub mod types;

pub use engine::{build_game, reconcile_game, GameReport};
pub use roster::PlayerTable;
pub use shifts::ShiftIndex;
