// src/dataset/workbook.rs

use calamine::{open_workbook_auto, Data, ExcelDateTime, Range, Reader};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::dates::{from_excel_serial, parse_date_text};
use super::table::{Cell, Column, Table};
use super::DatasetError;

/// A listings workbook on disk. Sheets are read on demand.
#[derive(Debug, Clone)]
pub struct ListingWorkbook {
    path: PathBuf,
    sheet_names: Vec<String>,
}

impl ListingWorkbook {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref().to_path_buf();
        let workbook = open_workbook_auto(&path)
            .map_err(|e| DatasetError::Workbook(format!("{}: {e}", path.display())))?;

        let sheet_names = workbook.sheet_names().to_vec();
        tracing::debug!(path = %path.display(), sheets = sheet_names.len(), "opened workbook");

        Ok(Self { path, sheet_names })
    }

    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    pub fn has_sheet(&self, name: &str) -> bool {
        self.sheet_names.iter().any(|s| s == name)
    }

    /// Reads one worksheet into a table, dropping columns that hold no values at all.
    pub fn load(&self, sheet_name: &str) -> Result<Table, DatasetError> {
        if !self.has_sheet(sheet_name) {
            return Err(DatasetError::SheetNotFound(sheet_name.to_string()));
        }

        let mut workbook = open_workbook_auto(&self.path)
            .map_err(|e| DatasetError::Workbook(format!("{}: {e}", self.path.display())))?;

        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|e| DatasetError::Workbook(format!("Failed to read '{sheet_name}': {e}")))?;

        let table = table_from_range(&range);
        tracing::info!(
            sheet = sheet_name,
            rows = table.height(),
            columns = table.columns().len(),
            "loaded worksheet"
        );

        Ok(table)
    }
}

/// Header row first, data rows after. Empty columns are dropped.
pub fn table_from_range(range: &Range<Data>) -> Table {
    let mut rows = range.rows();

    let Some(header) = rows.next() else {
        return Table::default();
    };

    let names = header_names(header);
    let mut columns: Vec<Column> = names.into_iter().map(|n| Column::new(n, Vec::new())).collect();

    for row in rows {
        for (idx, column) in columns.iter_mut().enumerate() {
            let cell = row.get(idx).map(to_cell).unwrap_or(Cell::Missing);
            column.cells.push(cell);
        }
    }

    Table::new(columns).drop_empty_columns()
}

/// Blank headers become `Unnamed: {idx}`; repeats get a `.{n}` suffix.
fn header_names(header: &[Data]) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();

    header
        .iter()
        .enumerate()
        .map(|(idx, data)| {
            let base = match to_cell(data) {
                Cell::Missing => format!("Unnamed: {idx}"),
                cell => cell.to_string(),
            };

            let seen = counts.entry(base.clone()).or_insert(0);
            let name = if *seen == 0 {
                base
            } else {
                format!("{base}.{seen}")
            };
            *seen += 1;
            name
        })
        .collect()
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Missing,
        Data::String(s) => Cell::text(s),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::Error(_) => Cell::Missing,
        Data::DateTime(dt) => excel_datetime(dt),
        Data::DateTimeIso(s) => parse_date_text(s)
            .map(Cell::Date)
            .unwrap_or_else(|| Cell::text(s)),
        Data::DurationIso(s) => Cell::text(s),
    }
}

/// Date-formatted cell to a timestamp. calamine applies the 1904 offset for
/// Mac workbooks; the raw serial is range-checked first.
fn excel_datetime(dt: &ExcelDateTime) -> Cell {
    if from_excel_serial(dt.as_f64()).is_none() {
        return Cell::Missing;
    }
    dt.as_datetime().map(Cell::Date).unwrap_or(Cell::Missing)
}
