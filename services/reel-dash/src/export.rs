// services/reel-dash/src/export.rs
//
// CSV export of the record set
//

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use svckit::Record;

pub const CSV_HEADER: [&str; 4] = ["id", "actorName", "movieName", "createdAt"];

/// Header plus one row per record, in input order.
/// Every field is double-quoted with embedded quotes doubled (RFC 4180), so
/// commas, quotes and line breaks inside values survive a round trip.
pub fn to_csv(records: &[Record]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(CSV_HEADER.join(","));

    for record in records {
        let id = record.id.to_string();
        let fields = [
            id.as_str(),
            record.actor_name.as_str(),
            record.movie_name.as_str(),
            record.created_at.as_str(),
        ];
        lines.push(
            fields
                .iter()
                .map(|f| quote_field(f))
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    lines.join("\n")
}

pub fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

pub fn export_file_name(date: NaiveDate) -> String {
    format!("records_{}.csv", date.format("%Y-%m-%d"))
}

/// Write `records_<date>.csv` into `dir`, creating the directory if needed.
pub fn write_csv(dir: &Path, records: &[Record], date: NaiveDate) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let path = dir.join(export_file_name(date));
    fs::write(&path, to_csv(records))
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}
