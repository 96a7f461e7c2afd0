// src/core/net.rs
//
// Data-source collaborator: anything that can turn a URL into a body.
// The reconciliation core never sees this; `scrape` hands it parsed payloads.
use std::{path::PathBuf, thread, time::Duration};

use reqwest::blocking::Client;

use crate::config::consts::{HTTP_RETRIES, HTTP_TIMEOUT_SECS, RETRY_PAUSE_MS, USER_AGENT};
use crate::core::sanitize::decode_latin1;
use crate::error::{Result, ScrapeError};
use crate::store;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    /// The HTML shift reports are ISO-8859-1.
    Latin1,
}

pub trait Source: Send + Sync {
    fn get(&self, url: &str, encoding: Encoding) -> Result<String>;
}

/// HTTP GET with an explicit timeout and a bounded number of retries.
pub struct HttpSource {
    client: Client,
    retries: u32,
}

enum Attempt {
    Done(String),
    Retry(ScrapeError),
    Fail(ScrapeError),
}

impl HttpSource {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| ScrapeError::unavailable("<client>", e))?;
        Ok(Self { client, retries: HTTP_RETRIES })
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    fn attempt(&self, url: &str, encoding: Encoding) -> Attempt {
        let resp = match self.client.get(url).send() {
            Ok(r) => r,
            Err(e) => return Attempt::Retry(ScrapeError::unavailable(url, e)),
        };
        let status = resp.status();
        if !status.is_success() {
            let err = ScrapeError::unavailable(url, format!("HTTP {status}"));
            // 4xx will not change on a second try
            return if status.is_server_error() { Attempt::Retry(err) } else { Attempt::Fail(err) };
        }
        let bytes = match resp.bytes() {
            Ok(b) => b,
            Err(e) => return Attempt::Retry(ScrapeError::unavailable(url, e)),
        };
        match encoding {
            Encoding::Latin1 => Attempt::Done(decode_latin1(&bytes)),
            Encoding::Utf8 => match String::from_utf8(bytes.to_vec()) {
                Ok(s) => Attempt::Done(s),
                Err(e) => Attempt::Fail(ScrapeError::unavailable(url, e)),
            },
        }
    }
}

impl Source for HttpSource {
    fn get(&self, url: &str, encoding: Encoding) -> Result<String> {
        let mut tries = 0u32;
        loop {
            match self.attempt(url, encoding) {
                Attempt::Done(body) => {
                    tracing::debug!(url, bytes = body.len(), "fetched");
                    return Ok(body);
                }
                Attempt::Retry(e) if tries < self.retries => {
                    tries += 1;
                    tracing::warn!("{e}; retry {tries}/{}", self.retries);
                    thread::sleep(Duration::from_millis(RETRY_PAUSE_MS * tries as u64));
                }
                Attempt::Retry(e) | Attempt::Fail(e) => return Err(e),
            }
        }
    }
}

/// Serves bodies from the local store when present, otherwise fetches through
/// `inner` and saves what it got. Store write failures only cost a refetch later.
pub struct CachedSource<S> {
    inner: S,
    dir: PathBuf,
}

impl<S: Source> CachedSource<S> {
    pub fn new(inner: S, dir: impl Into<PathBuf>) -> Self {
        Self { inner, dir: dir.into() }
    }
}

impl<S: Source> Source for CachedSource<S> {
    fn get(&self, url: &str, encoding: Encoding) -> Result<String> {
        if let Some(body) = store::load_payload(&self.dir, url) {
            tracing::debug!(url, "cache hit");
            return Ok(body);
        }
        let body = self.inner.get(url, encoding)?;
        if let Err(e) = store::save_payload(&self.dir, url, &body) {
            tracing::warn!("could not cache {url}: {e}");
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting(AtomicUsize);

    impl Source for Counting {
        fn get(&self, url: &str, _encoding: Encoding) -> Result<String> {
            if url.ends_with("/missing") {
                return Err(ScrapeError::unavailable(url, "HTTP 404 Not Found"));
            }
            self.0.fetch_add(1, Ordering::Relaxed);
            Ok(format!("body of {url}"))
        }
    }

    #[test]
    fn second_get_is_served_from_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let cached = CachedSource::new(Counting(AtomicUsize::new(0)), dir.path());
        let url = "https://api-web.nhle.com/v1/gamecenter/2023020005/play-by-play";

        assert_eq!(cached.get(url, Encoding::Utf8).unwrap(), format!("body of {url}"));
        assert_eq!(cached.get(url, Encoding::Utf8).unwrap(), format!("body of {url}"));
        assert_eq!(cached.inner.0.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn failures_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let cached = CachedSource::new(Counting(AtomicUsize::new(0)), dir.path());
        let err = cached.get("https://example.invalid/missing", Encoding::Utf8).unwrap_err();
        assert!(matches!(err, ScrapeError::SourceUnavailable { .. }));
        assert!(store::load_payload(dir.path(), "https://example.invalid/missing").is_none());
    }
}
