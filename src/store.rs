// src/store.rs
//
// Local store: raw payload cache under `.store/` and the in-memory table shape
// handed to the exporters.
use std::{fs, io, path::{Path, PathBuf}};

/// Headers + rows, ready for `csv`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataSet {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

/// File name for a cached payload: the URL minus its scheme, with anything
/// that is not safe in a file name replaced.
pub fn cache_key(url: &str) -> String {
    let bare = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    bare.chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect()
}

pub fn payload_path(dir: &Path, url: &str) -> PathBuf {
    dir.join(cache_key(url))
}

pub fn load_payload(dir: &Path, url: &str) -> Option<String> {
    fs::read_to_string(payload_path(dir, url)).ok()
}

pub fn save_payload(dir: &Path, url: &str, body: &str) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    fs::write(payload_path(dir, url), body)
}
