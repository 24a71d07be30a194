// src/dataset/table.rs

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use std::fmt;

/// Spellings that dataframe readers treat as "not available" by default.
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A single worksheet value after loading.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Missing,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDateTime),
}

impl Cell {
    /// Builds a text cell, folding the usual NA spellings into `Missing`.
    /// Whitespace-only text is kept as text.
    pub fn text(s: &str) -> Self {
        if NA_TOKENS.contains(&s) {
            Cell::Missing
        } else {
            Cell::Text(s.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Missing => true,
            Cell::Number(n) => n.is_nan(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            Cell::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Numeric view of a cell. Text is accepted when it reads as an amount,
    /// so `"$450,000"` and `"450000"` both give `450000.0`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if !n.is_nan() => Some(*n),
            Cell::Text(s) => {
                let cleaned: String = s
                    .trim()
                    .chars()
                    .filter(|c| !matches!(c, '$' | ',' | ' '))
                    .collect();
                cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
            }
            _ => None,
        }
    }

    /// Whether the value would count as "set" when deciding to show it.
    /// Zero, false and empty text are not.
    pub fn is_truthy(&self) -> bool {
        match self {
            Cell::Missing => false,
            Cell::Text(s) => !s.is_empty(),
            Cell::Number(n) => *n != 0.0 && !n.is_nan(),
            Cell::Bool(b) => *b,
            Cell::Date(_) => true,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Missing => Ok(()),
            Cell::Text(s) => write!(f, "{s}"),
            // Integers without decimals: 3 bedrooms, not 3.0
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Missing => s.serialize_none(),
            Cell::Text(t) => s.serialize_str(t),
            Cell::Number(n) if n.is_nan() => s.serialize_none(),
            Cell::Number(n) => s.serialize_f64(*n),
            Cell::Bool(b) => s.serialize_bool(*b),
            Cell::Date(d) => s.collect_str(&d.format("%Y-%m-%d")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    pub fn is_all_missing(&self) -> bool {
        self.cells.iter().all(Cell::is_missing)
    }

    /// Non-missing cells in row order.
    pub fn present(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|c| !c.is_missing())
    }

    /// Distinct non-missing values, in the order they were first seen.
    pub fn distinct(&self) -> Vec<Cell> {
        let mut seen: Vec<Cell> = Vec::new();
        for cell in self.present() {
            if !seen.contains(cell) {
                seen.push(cell.clone());
            }
        }
        seen
    }
}

/// Column-major table of one worksheet. Every column has `height` cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    height: usize,
}

impl Table {
    /// Builds a table, padding short columns with `Missing` so all share one height.
    pub fn new(mut columns: Vec<Column>) -> Self {
        let height = columns.iter().map(|c| c.cells.len()).max().unwrap_or(0);
        for column in &mut columns {
            column.cells.resize(height, Cell::Missing);
        }
        Self { columns, height }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.height == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Removes every column whose cells are all missing.
    pub fn drop_empty_columns(self) -> Self {
        let columns = self
            .columns
            .into_iter()
            .filter(|c| !c.is_all_missing())
            .collect();
        Self {
            columns,
            height: self.height,
        }
    }

    /// Applies `f` to each column whose name satisfies `pick`; others pass through.
    pub fn map_columns<P, F>(self, pick: P, f: F) -> Self
    where
        P: Fn(&str) -> bool,
        F: Fn(Cell) -> Cell,
    {
        let columns = self
            .columns
            .into_iter()
            .map(|col| {
                if pick(&col.name) {
                    let cells = col.cells.into_iter().map(&f).collect();
                    Column::new(col.name, cells)
                } else {
                    col
                }
            })
            .collect();
        Self {
            columns,
            height: self.height,
        }
    }

    /// Keeps only the rows whose index satisfies `keep`, preserving order.
    pub fn filter_rows<F>(&self, keep: F) -> Self
    where
        F: Fn(usize) -> bool,
    {
        let rows: Vec<usize> = (0..self.height).filter(|&i| keep(i)).collect();
        let columns = self
            .columns
            .iter()
            .map(|col| {
                let cells = rows.iter().map(|&i| col.cells[i].clone()).collect();
                Column::new(col.name.clone(), cells)
            })
            .collect();
        Self {
            columns,
            height: rows.len(),
        }
    }
}
