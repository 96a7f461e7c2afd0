// src/csv.rs
//
// Delimited text for a `DataSet`. Fields are quoted only when they contain the
// separator, a quote or a line break.
use std::fmt::Write;

use crate::store::DataSet;

fn quoted(field: &str, sep: char) -> bool {
    field.contains([sep, '"', '\n', '\r'])
}

/// Append one row, newline included.
pub fn write_row(out: &mut String, row: &[String], sep: char) {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            out.push(sep);
        }
        if quoted(cell, sep) {
            let _ = write!(out, "\"{}\"", cell.replace('"', "\"\""));
        } else {
            out.push_str(cell);
        }
    }
    out.push('\n');
}

/// Whole table as one string; the header line only when asked for and present.
pub fn to_export_string(data: &DataSet, include_headers: bool, sep: char) -> String {
    let mut out = String::new();
    if let Some(h) = data.headers.as_ref().filter(|_| include_headers) {
        write_row(&mut out, h, sep);
    }
    for row in &data.rows {
        write_row(&mut out, row, sep);
    }
    out
}
