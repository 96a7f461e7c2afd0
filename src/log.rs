// src/log.rs
//
// Subscriber setup for the binary. The library only emits `tracing` events.
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::consts::{LOG_ENV, LOG_FILE, STORE_DIR};

/// `-v` count to a default filter; `NHL_SCRAPE_LOG` wins when set.
pub fn default_directive(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("warn,nhl_scrape={level}")
}

/// stderr at the chosen level, plus everything the filter lets through
/// appended to `.store/debug.log` with uptime stamps.
pub fn init(verbosity: u8) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let file_layer = match open_log_file(Path::new(STORE_DIR)) {
        Ok(file) => Some(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_timer(fmt::time::uptime()),
        ),
        Err(e) => {
            eprintln!("Warning: no debug log ({e})");
            None
        }
    };

    Registry::default()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;
    Ok(())
}

fn open_log_file(dir: &Path) -> std::io::Result<fs::File> {
    fs::create_dir_all(dir)?;
    OpenOptions::new().create(true).append(true).open(dir.join(LOG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_crate_level() {
        assert_eq!(default_directive(0), "warn,nhl_scrape=warn");
        assert_eq!(default_directive(2), "warn,nhl_scrape=debug");
        assert_eq!(default_directive(9), "warn,nhl_scrape=trace");
    }

    #[test]
    fn log_file_is_appended() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("store");
        open_log_file(&nested).unwrap();
        assert!(nested.join(LOG_FILE).exists());
    }
}
