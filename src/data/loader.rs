use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, DataType, Range, Reader};
use chrono::{NaiveTime, Timelike};
use thiserror::Error;

use super::model::{Dimension, SalesDataset, SalesRow};

/// Header names the source must provide, in the order they are reported
/// when missing.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "City",
    "Customer_type",
    "Gender",
    "Product line",
    "Total",
    "Rating",
    "Time",
];

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("malformed source: {0}")]
    MalformedSource(String),
    #[error("row {row}, column '{column}': cannot parse '{value}': {reason}")]
    Parse {
        /// 1-based row number in the source sheet.
        row: usize,
        column: &'static str,
        value: String,
        reason: String,
    },
    #[error("reading workbook: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("reading CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
}

// ---------------------------------------------------------------------------
// Source description
// ---------------------------------------------------------------------------

/// A contiguous, inclusive range of 0-based column indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRange {
    pub first: usize,
    pub last: usize,
}

impl ColumnRange {
    /// Parse an A1-style range such as `"B:R"` or a single column `"C"`.
    pub fn parse(text: &str) -> Option<Self> {
        let (first, last) = match text.split_once(':') {
            Some((a, b)) => (column_index(a)?, column_index(b)?),
            None => {
                let only = column_index(text)?;
                (only, only)
            }
        };
        (first <= last).then_some(ColumnRange { first, last })
    }

    fn slice<'a>(&self, row: &'a [Cell]) -> &'a [Cell] {
        let end = (self.last + 1).min(row.len());
        let start = self.first.min(end);
        &row[start..end]
    }
}

/// `A` → 0, `Z` → 25, `AA` → 26.
fn column_index(letters: &str) -> Option<usize> {
    let letters = letters.trim();
    if letters.is_empty() || letters.len() > 3 || !letters.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    let n = letters
        .bytes()
        .fold(0usize, |acc, b| acc * 26 + (b.to_ascii_uppercase() - b'A' + 1) as usize);
    Some(n - 1)
}

/// Where the header and data live inside a sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    /// Worksheet name; ignored for CSV sources.
    pub sheet: String,
    /// Rows preceding the header row.
    pub skip_rows: usize,
    pub columns: ColumnRange,
    /// Cap on data rows read; `None` reads everything.
    pub max_rows: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceSpec {
    pub path: PathBuf,
    pub layout: SheetLayout,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the sales dataset. Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – workbook, named sheet
/// * `.csv` – export of the same sheet, same row/column layout
pub fn load(spec: &SourceSpec) -> Result<SalesDataset, LoadError> {
    let ext = spec
        .path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let grid = match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook(&spec.path, &spec.layout.sheet)?,
        "csv" => read_csv(&spec.path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    let dataset = parse_grid(&grid, &spec.layout)?;
    log::info!(
        "Loaded {} sales rows from {} ({} cities, {} customer types, {} genders)",
        dataset.len(),
        spec.path.display(),
        dataset.distinct_values(Dimension::City).len(),
        dataset.distinct_values(Dimension::CustomerType).len(),
        dataset.distinct_values(Dimension::Gender).len(),
    );
    Ok(dataset)
}

/// Parse a `HH:MM:SS` time of day.
pub fn parse_time_of_day(text: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(text.trim(), "%H:%M:%S")
}

// ---------------------------------------------------------------------------
// Cells – the common grid both readers produce
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Cell {
    Empty,
    Text(String),
    Number(f64),
    /// A native spreadsheet time (or datetime) value.
    Time(NaiveTime),
}

static EMPTY_CELL: Cell = Cell::Empty;

impl Cell {
    fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(v) if v.fract() == 0.0 && v.abs() < 1e15 => format!("{}", *v as i64),
            Cell::Number(v) => v.to_string(),
            Cell::Time(t) => t.format("%H:%M:%S").to_string(),
        }
    }
}

fn cell_from_text(raw: &str) -> Cell {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Cell::Empty;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Cell::Number(v),
        _ => Cell::Text(raw.to_string()),
    }
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(v) => Cell::Number(*v),
        Data::Int(v) => Cell::Number(*v as f64),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(_) | Data::DateTimeIso(_) => match data.as_time() {
            Some(t) => Cell::Time(t),
            None => Cell::Text(data.to_string()),
        },
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Readers
// ---------------------------------------------------------------------------

fn read_workbook(path: &Path, sheet: &str) -> Result<Vec<Vec<Cell>>, LoadError> {
    let mut workbook = open_workbook_auto(path)?;
    if !workbook.sheet_names().iter().any(|name| name == sheet) {
        return Err(LoadError::MalformedSource(format!(
            "sheet '{sheet}' not found in {}",
            path.display()
        )));
    }
    let range = workbook.worksheet_range(sheet)?;
    Ok(range_to_grid(&range))
}

/// Calamine ranges start at the first used cell; pad so that grid
/// coordinates match sheet coordinates (row 0 = sheet row 1, col 0 = A).
fn range_to_grid(range: &Range<Data>) -> Vec<Vec<Cell>> {
    let Some((row0, col0)) = range.start() else {
        return Vec::new();
    };
    let mut grid: Vec<Vec<Cell>> = (0..row0).map(|_| Vec::new()).collect();
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; col0 as usize];
        cells.extend(row.iter().map(cell_from_data));
        grid.push(cells);
    }
    grid
}

/// CSV layout mirrors the sheet: banner rows, header, data. Note that the
/// csv reader drops lines that are completely empty, so banner rows need at
/// least a separator to be counted.
fn read_csv(path: &Path) -> Result<Vec<Vec<Cell>>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record?;
        grid.push(record.iter().map(cell_from_text).collect());
    }
    Ok(grid)
}

// ---------------------------------------------------------------------------
// Grid → dataset
// ---------------------------------------------------------------------------

/// Positions of the required columns inside the sliced column range.
struct ColumnIndex {
    city: usize,
    customer_type: usize,
    gender: usize,
    product_line: usize,
    total: usize,
    rating: usize,
    time: usize,
}

impl ColumnIndex {
    fn locate(header: &[Cell]) -> Result<Self, LoadError> {
        let names: Vec<String> = header.iter().map(Cell::as_text).collect();
        let mut missing = Vec::new();
        let mut find = |name: &'static str| match names.iter().position(|h| h == name) {
            Some(i) => i,
            None => {
                missing.push(name);
                0
            }
        };

        let index = ColumnIndex {
            city: find(REQUIRED_COLUMNS[0]),
            customer_type: find(REQUIRED_COLUMNS[1]),
            gender: find(REQUIRED_COLUMNS[2]),
            product_line: find(REQUIRED_COLUMNS[3]),
            total: find(REQUIRED_COLUMNS[4]),
            rating: find(REQUIRED_COLUMNS[5]),
            time: find(REQUIRED_COLUMNS[6]),
        };

        if missing.is_empty() {
            Ok(index)
        } else {
            Err(LoadError::MalformedSource(format!(
                "missing columns: {}",
                missing.join(", ")
            )))
        }
    }
}

pub(crate) fn parse_grid(grid: &[Vec<Cell>], layout: &SheetLayout) -> Result<SalesDataset, LoadError> {
    let mut lines = grid.iter().enumerate().skip(layout.skip_rows);

    let (_, header) = lines.next().ok_or_else(|| {
        LoadError::MalformedSource(format!(
            "no header row after skipping {} rows",
            layout.skip_rows
        ))
    })?;
    let index = ColumnIndex::locate(layout.columns.slice(header))?;

    let mut rows = Vec::new();
    for (i, line) in lines {
        let cells = layout.columns.slice(line);
        if cells.iter().all(Cell::is_blank) {
            log::debug!("Skipping empty source row {}", i + 1);
            continue;
        }
        if let Some(cap) = layout.max_rows {
            if rows.len() == cap {
                log::info!("Row cap of {cap} reached, ignoring remaining source rows");
                break;
            }
        }
        rows.push(parse_row(cells, &index, i + 1)?);
    }

    Ok(SalesDataset::from_rows(rows))
}

fn parse_row(cells: &[Cell], index: &ColumnIndex, source_row: usize) -> Result<SalesRow, LoadError> {
    let cell = |i: usize| cells.get(i).unwrap_or(&EMPTY_CELL);

    let time = parse_time_cell(cell(index.time), source_row)?;

    Ok(SalesRow {
        city: cell(index.city).as_text(),
        customer_type: cell(index.customer_type).as_text(),
        gender: cell(index.gender).as_text(),
        product_line: cell(index.product_line).as_text(),
        total: parse_number(cell(index.total), "Total", source_row)?,
        rating: parse_number(cell(index.rating), "Rating", source_row)?,
        time: time.format("%H:%M:%S").to_string(),
        hour: time.hour() as u8,
    })
}

fn parse_time_cell(cell: &Cell, row: usize) -> Result<NaiveTime, LoadError> {
    let parse_error = |reason: String| LoadError::Parse {
        row,
        column: "Time",
        value: cell.as_text(),
        reason,
    };
    match cell {
        Cell::Time(t) => Ok(*t),
        Cell::Text(s) => parse_time_of_day(s).map_err(|e| parse_error(e.to_string())),
        _ => Err(parse_error("expected HH:MM:SS".to_string())),
    }
}

fn parse_number(cell: &Cell, column: &'static str, row: usize) -> Result<f64, LoadError> {
    let parse_error = |reason: &str| LoadError::Parse {
        row,
        column,
        value: cell.as_text(),
        reason: reason.to_string(),
    };
    match cell {
        Cell::Number(v) => Ok(*v),
        Cell::Text(s) => match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(parse_error("not a number")),
        },
        _ => Err(parse_error("expected a number")),
    }
}
