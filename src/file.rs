// src/file.rs

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    slice,
};

use crate::config::options::{ExportOptions, ExportType, TableKind};
use crate::csv::to_export_string;
use crate::engine::GameReport;
use crate::error::{Result, ScrapeError};
use crate::store::DataSet;
use crate::table::{events_table, rosters_table, shifts_table};

pub fn project(table: TableKind, reports: &[GameReport]) -> DataSet {
    match table {
        TableKind::Pbp => events_table(reports),
        TableKind::Rosters => rosters_table(reports),
        TableKind::Shifts => shifts_table(reports),
    }
}

/// Write every selected table, merged or one file per game.
/// Returns the paths written, in write order.
pub fn export_tables(export: &ExportOptions, reports: &[GameReport]) -> Result<Vec<PathBuf>> {
    ensure_directory(&export.out_dir)?;
    let mut written = Vec::new();

    match export.export_type {
        ExportType::SingleFile => {
            for &table in &export.tables {
                let path = export.single_path(table);
                write_table(export, &path, &project(table, reports))?;
                written.push(path);
            }
        }
        ExportType::PerGame => {
            let mut seen: HashMap<String, usize> = HashMap::new();
            for report in reports {
                for &table in &export.tables {
                    let stem = format!("{}_{}", report.game.id, table.stem());
                    let path = resolve_filename(&export.out_dir, &stem, &mut seen, export.format.ext());
                    write_table(export, &path, &project(table, slice::from_ref(report)))?;
                    written.push(path);
                }
            }
        }
    }
    tracing::debug!(files = written.len(), "export finished");
    Ok(written)
}

fn write_table(export: &ExportOptions, path: &Path, data: &DataSet) -> Result<()> {
    let contents = to_export_string(data, export.include_headers, export.format.delim());
    fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(ScrapeError::InvalidArgument(format!(
            "Path exists but is not a directory: {}",
            dir.display()
        )));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Duplicate handling **only within this run**
pub fn resolve_filename(
    dir: &Path,
    stem: &str,                        // no extension
    seen_names: &mut HashMap<String, usize>,
    ext: &str,                         // "csv" | "tsv"
) -> PathBuf {
    let count = seen_names.entry(stem.to_string()).or_insert(0);

    // First occurrence: "<stem>.ext"
    // Subsequent:       "<stem> (N).ext" with N starting at 2
    let filename = if *count == 0 {
        format!("{stem}.{ext}")
    } else {
        format!("{stem} ({}).{ext}", *count + 1)
    };

    *count += 1;
    dir.join(filename)
}
