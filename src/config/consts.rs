// src/config/consts.rs

// Net config
pub const API_BASE: &str = "https://api-web.nhle.com/v1";
pub const PLAY_BY_PLAY_PATH: &str = "/gamecenter/{game_id}/play-by-play";
pub const SCHEDULE_PATH: &str = "/club-schedule-season/{team}/{season}";
pub const SHIFT_CHARTS_URL: &str = "https://api.nhle.com/stats/rest/en/shiftcharts?cayenneExp=gameId={game_id}";
pub const SHIFT_REPORT_URL: &str = "http://www.nhl.com/scores/htmlreports/{season}/{prefix}{suffix}.HTM";
pub const SHIFT_REPORT_HOME: &str = "TH";
pub const SHIFT_REPORT_AWAY: &str = "TV";
pub const USER_AGENT: &str = concat!("nhl_scrape/", env!("CARGO_PKG_VERSION"));
pub const HTTP_TIMEOUT_SECS: u64 = 20;
pub const HTTP_RETRIES: u32 = 2; // attempts after the first
pub const RETRY_PAUSE_MS: u64 = 500;

// Local cache
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";
pub const LOG_ENV: &str = "NHL_SCRAPE_LOG";
pub const CONFIG_FILE: &str = "nhl_scrape.cfg";

// Game clock
pub const PERIOD_SECONDS: u32 = 20 * 60;
pub const FIRST_SHOOTOUT_PERIOD: u8 = 5; // non-playoff games only

// Rink
pub const MAX_SKATERS: usize = 6;

// Defaults
pub const DEFAULT_SEASON: u32 = 20232024;

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE: &str = "all";

// Concurrency
pub const WORKERS: usize = 4;
pub const REQUEST_PAUSE_MS: u64 = 150; // be polite
pub const JITTER_MS: u64 = 50; // extra 0..50 ms
