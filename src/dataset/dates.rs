// src/dataset/dates.rs

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use super::table::{Cell, Table};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%m/%d/%y",
    "%Y/%m/%d",
    "%d-%b-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

/// Columns holding dates are recognized by name alone.
pub fn is_date_column(name: &str) -> bool {
    name.contains("Date")
}

/// Converts every cell of every `*Date*` column into a date.
/// Cells that can't be read as one become `Missing`; nothing here fails.
pub fn normalize(table: Table) -> Table {
    table.map_columns(is_date_column, to_date_cell)
}

pub fn to_date_cell(cell: Cell) -> Cell {
    let parsed = match &cell {
        Cell::Date(d) => Some(*d),
        Cell::Text(s) => parse_date_text(s),
        Cell::Number(n) => from_excel_serial(*n),
        Cell::Bool(_) | Cell::Missing => None,
    };

    parsed.map(Cell::Date).unwrap_or(Cell::Missing)
}

pub fn parse_date_text(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Excel serial day number (1900 date system) to a timestamp.
pub fn from_excel_serial(serial: f64) -> Option<NaiveDateTime> {
    // 2958465 is 9999-12-31, the last day Excel can show.
    if !serial.is_finite() || !(1.0..2_958_466.0).contains(&serial) {
        return None;
    }

    // Serials below 61 predate Excel's phantom 1900-02-29.
    let epoch = if serial < 61.0 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };

    let days = serial.trunc() as i64;
    let millis = (serial.fract() * 86_400_000.0).round() as i64;

    epoch
        .and_time(NaiveTime::MIN)
        .checked_add_signed(Duration::days(days))?
        .checked_add_signed(Duration::milliseconds(millis))
}
