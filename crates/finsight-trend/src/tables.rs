//! CSV extract loading.

use std::path::Path;

use finsight_core::errors::{FinsightResult, TrendError};
use tracing::{info, warn};

/// One loaded CSV extract.
#[derive(Debug)]
pub struct Table {
    pub source_file: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Load every `*.csv` in the directory, sorted by filename.
///
/// Unreadable files are skipped with a warning; no files at all, or all
/// files unreadable, is an error the caller reports as unavailable data.
pub fn load_tables(dir: &Path) -> FinsightResult<Vec<Table>> {
    let mut csv_paths: Vec<_> = std::fs::read_dir(dir)
        .map_err(|_| TrendError::NoTables {
            dir: dir.display().to_string(),
        })?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.eq_ignore_ascii_case("csv"))
                .unwrap_or(false)
        })
        .collect();
    csv_paths.sort();

    if csv_paths.is_empty() {
        return Err(TrendError::NoTables {
            dir: dir.display().to_string(),
        }
        .into());
    }

    let mut tables = Vec::new();
    for path in &csv_paths {
        match load_one(path) {
            Ok(table) => {
                info!(
                    file = %table.source_file,
                    rows = table.rows.len(),
                    cols = table.headers.len(),
                    "CSV loaded"
                );
                tables.push(table);
            }
            Err(e) => warn!(file = %path.display(), error = %e, "could not load CSV, skipping"),
        }
    }

    if tables.is_empty() {
        return Err(TrendError::AllTablesUnreadable {
            dir: dir.display().to_string(),
        }
        .into());
    }

    Ok(tables)
}

fn load_one(path: &Path) -> Result<Table, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;

    let headers = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    let source_file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(Table {
        source_file,
        headers,
        rows,
    })
}
