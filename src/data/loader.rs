use std::collections::{HashMap, HashSet};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use calamine::{open_workbook_auto_from_rs, Data, DataType, Range, Reader};
use chrono::{NaiveDateTime, NaiveTime};
use sha2::{Digest, Sha256};

use super::model::{CellValue, Table, Workbook};
use crate::error::{AppError, Result};

// ---------------------------------------------------------------------------
// Input resolution
// ---------------------------------------------------------------------------

/// Pick the document to load: an explicit upload wins, otherwise the default
/// file if it exists. Neither is a terminal [`AppError::InputMissing`].
pub fn resolve_input(upload: Option<&Path>, default_path: &Path) -> Result<PathBuf> {
    if let Some(path) = upload {
        return Ok(path.to_path_buf());
    }
    if default_path.is_file() {
        log::info!("No upload, using default workbook {}", default_path.display());
        return Ok(default_path.to_path_buf());
    }
    Err(AppError::InputMissing {
        default_path: default_path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Content-keyed workbook cache
// ---------------------------------------------------------------------------

type Slot = Arc<Mutex<Option<Arc<Workbook>>>>;

/// Memoizes parsed workbooks by the SHA-256 of their bytes.
///
/// Each key owns its own slot, so two callers asking for the same document at
/// once parse it only once while different documents never wait on each
/// other. Failed parses leave the slot empty and are retried on the next call.
#[derive(Debug, Default)]
pub struct WorkbookCache {
    slots: Mutex<HashMap<String, Slot>>,
    parses: AtomicUsize,
}

impl WorkbookCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a workbook from disk. The file is hashed by content, so a path and
    /// an upload of the same document share one entry.
    pub fn load_path(&self, path: &Path) -> Result<Arc<Workbook>> {
        let label = path.display().to_string();
        let bytes = std::fs::read(path).map_err(|source| AppError::Unreadable {
            input: label.clone(),
            source,
        })?;
        self.load_bytes(&label, &bytes)
    }

    /// Parse an in-memory document, `label` names it in errors and logs.
    pub fn load_bytes(&self, label: &str, bytes: &[u8]) -> Result<Arc<Workbook>> {
        let key = content_key(bytes);
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(slots.entry(key).or_default())
        };

        let mut cached = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(workbook) = cached.as_ref() {
            log::debug!("Workbook cache hit for {label}");
            return Ok(Arc::clone(workbook));
        }

        let workbook = Arc::new(parse_workbook(label, bytes)?);
        let parses = self.parses.fetch_add(1, Ordering::Relaxed) + 1;
        log::info!(
            "Loaded {label}: {} sheet(s) {:?} ({parses} workbook(s) parsed)",
            workbook.len(),
            workbook.sheet_names().collect::<Vec<_>>()
        );
        *cached = Some(Arc::clone(&workbook));
        Ok(workbook)
    }

    /// How many documents have actually been parsed (cache misses).
    #[cfg(test)]
    pub fn parse_count(&self) -> usize {
        self.parses.load(Ordering::Relaxed)
    }
}

fn content_key(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

// ---------------------------------------------------------------------------
// Spreadsheet parsing
// ---------------------------------------------------------------------------

/// Parse every sheet of a spreadsheet document (xlsx, xlsm, xlsb, xls, ods).
pub fn parse_workbook(label: &str, bytes: &[u8]) -> Result<Workbook> {
    let parse_err = |source| AppError::Parse {
        input: label.to_string(),
        source,
    };

    let mut sheets = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(parse_err)?;
    let names = sheets.sheet_names();

    let mut tables = Vec::with_capacity(names.len());
    for name in names {
        let range = sheets.worksheet_range(&name).map_err(parse_err)?;
        let table = table_from_range(&range);
        log::debug!(
            "Sheet {name:?}: {} column(s), {} row(s)",
            table.columns().len(),
            table.len()
        );
        tables.push((name, table));
    }

    Ok(Workbook::from_sheets(tables))
}

/// First row is the header, the rest are data rows.
///
/// A range starts at its first used cell; blank columns to the left of it are
/// restored so column positions match the sheet.
fn table_from_range(range: &Range<Data>) -> Table {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Table::default();
    };
    let lead = range.start().map_or(0, |(_, col)| col as usize);

    let blank = Data::Empty;
    let names = std::iter::repeat(&blank)
        .take(lead)
        .chain(header.iter())
        .enumerate()
        .map(|(idx, cell)| match cell {
            Data::Empty => format!("Unnamed: {idx}"),
            Data::String(s) if s.is_empty() => format!("Unnamed: {idx}"),
            Data::String(s) => s.clone(),
            other => cell_value(other).to_string(),
        });
    let columns = dedup_headers(names);

    let data = rows
        .map(|row| {
            std::iter::repeat(CellValue::Null)
                .take(lead)
                .chain(row.iter().map(cell_value))
                .collect()
        })
        .collect();

    Table::new(columns, data)
}

/// Repeated headers get `.1`, `.2`, ... suffixes so every column name is
/// unique: `km, km, km.1` becomes `km, km.1, km.1.1`.
fn dedup_headers(names: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::new();
    for name in names {
        let mut unique = name.clone();
        if seen.contains(&unique) {
            let count = counts.entry(name.clone()).or_insert(0);
            while seen.contains(&unique) {
                *count += 1;
                unique = format!("{name}.{count}");
            }
        }
        seen.insert(unique.clone());
        out.push(unique);
    }
    out
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Null,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => number_cell(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) if dt.is_duration() => CellValue::Float(dt.as_f64()),
        Data::DateTime(dt) => match cell.as_datetime() {
            Some(ts) => date_cell(ts),
            None => CellValue::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
    }
}

/// Midnight timestamps are plain dates.
fn date_cell(ts: NaiveDateTime) -> CellValue {
    let text = if ts.time() == NaiveTime::MIN {
        ts.format("%Y-%m-%d").to_string()
    } else {
        ts.format("%Y-%m-%d %H:%M:%S").to_string()
    };
    CellValue::Date(text)
}

/// Spreadsheets store every number as a float; whole numbers become integers
/// so `120` does not come back as `120.0`.
fn number_cell(f: f64) -> CellValue {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0; // 2^53
    if f.is_finite() && f.fract() == 0.0 && f.abs() <= MAX_EXACT {
        CellValue::Integer(f as i64)
    } else {
        CellValue::Float(f)
    }
}
