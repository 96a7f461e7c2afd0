// src/lib.rs
#[macro_use]
pub mod macros;

pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod specs;

pub mod csv;
pub mod file;
pub mod log;
pub mod progress;
pub mod scrape;
pub mod store;
pub mod table;

#[cfg(feature = "cli")]
pub mod cli;

pub use engine::{reconcile_game, GameReport};
pub use error::{Result, ScrapeError};
