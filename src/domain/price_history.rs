// src/domain/price_history.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize, Serializer};

use crate::dataset::dates::to_date_cell;
use crate::dataset::{Cell, Column, Table};

/// How the numbered Date/Price columns are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingMode {
    /// Each column drops its own missing cells before concatenation, and a pair
    /// only contributes when both columns still have values. The two sequences
    /// can end up with different lengths when rows are half-filled.
    #[default]
    Independent,
    /// An observation is kept only when the date and the price of the same row are both present.
    RowAligned,
}

/// Timestamps and prices, index-aligned, in pair order (pair 1 first).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PriceHistory {
    #[serde(serialize_with = "serialize_dates")]
    pub dates: Vec<NaiveDateTime>,
    pub prices: Vec<f64>,
}

impl PriceHistory {
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Observations where both sequences have an entry.
    pub fn points(&self) -> impl Iterator<Item = (NaiveDateTime, f64)> + '_ {
        self.dates.iter().copied().zip(self.prices.iter().copied())
    }

    pub fn is_aligned(&self) -> bool {
        self.dates.len() == self.prices.len()
    }

    /// Scans `Date{i}`/`Price{i}` for `i` in `1..=max_pairs`, skipping pairs
    /// where either column is absent from the table.
    pub fn from_table(table: &Table, max_pairs: usize, mode: PairingMode) -> Self {
        let mut history = PriceHistory::default();

        for i in 1..=max_pairs {
            let (Some(date_col), Some(price_col)) = (
                table.column(&format!("Date{i}")),
                table.column(&format!("Price{i}")),
            ) else {
                continue;
            };

            match mode {
                PairingMode::Independent => history.extend_independent(date_col, price_col),
                PairingMode::RowAligned => history.extend_row_aligned(date_col, price_col),
            }
        }

        history
    }

    fn extend_independent(&mut self, date_col: &Column, price_col: &Column) {
        let dates: Vec<NaiveDateTime> = date_col.present().filter_map(date_of).collect();
        let prices: Vec<f64> = price_col.present().filter_map(Cell::as_number).collect();

        if !dates.is_empty() && !prices.is_empty() {
            self.dates.extend(dates);
            self.prices.extend(prices);
        }
    }

    fn extend_row_aligned(&mut self, date_col: &Column, price_col: &Column) {
        for (date, price) in date_col.cells.iter().zip(&price_col.cells) {
            if let (Some(d), Some(p)) = (date_of(date), price.as_number()) {
                self.dates.push(d);
                self.prices.push(p);
            }
        }
    }
}

// Re-parsing an already normalized cell is a no-op, so raw tables work too.
fn date_of(cell: &Cell) -> Option<NaiveDateTime> {
    to_date_cell(cell.clone()).as_date()
}

fn serialize_dates<S: Serializer>(dates: &[NaiveDateTime], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(dates.iter().map(|d| d.format("%Y-%m-%d").to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn half_filled() -> Table {
        Table::new(vec![
            Column::new("Date1", vec![Cell::text("2023-01-01"), Cell::text("2023-02-01")]),
            Column::new("Price1", vec![Cell::Missing, Cell::Number(150.0)]),
            Column::new("Date2", vec![Cell::text("2023-03-01"), Cell::Missing]),
            Column::new("Price2", vec![Cell::Number(175.0), Cell::Number(180.0)]),
        ])
    }

    #[test]
    fn independent_drops_per_column() {
        let history = PriceHistory::from_table(&half_filled(), 10, PairingMode::Independent);
        assert_eq!(
            history.dates,
            vec![ymd(2023, 1, 1), ymd(2023, 2, 1), ymd(2023, 3, 1)]
        );
        assert_eq!(history.prices, vec![150.0, 175.0, 180.0]);
        assert!(history.is_aligned());
    }

    #[test]
    fn independent_can_desynchronize() {
        let table = Table::new(vec![
            Column::new("Date1", vec![Cell::text("2023-01-01"), Cell::text("2023-02-01")]),
            Column::new("Price1", vec![Cell::Missing, Cell::Number(150.0)]),
        ]);
        let history = PriceHistory::from_table(&table, 10, PairingMode::Independent);
        assert_eq!(history.dates.len(), 2);
        assert_eq!(history.prices.len(), 1);
        assert!(!history.is_aligned());
    }

    #[test]
    fn row_aligned_keeps_complete_rows_only() {
        let history = PriceHistory::from_table(&half_filled(), 10, PairingMode::RowAligned);
        assert_eq!(history.dates, vec![ymd(2023, 2, 1), ymd(2023, 3, 1)]);
        assert_eq!(history.prices, vec![150.0, 175.0]);
        assert!(history.is_aligned());
    }

    #[test]
    fn pair_with_one_empty_side_contributes_nothing() {
        let table = Table::new(vec![
            Column::new("Date1", vec![Cell::text("2023-01-01")]),
            Column::new("Price1", vec![Cell::Missing]),
            Column::new("Date2", vec![Cell::text("2023-05-01")]),
            Column::new("Price2", vec![Cell::Number(99.0)]),
        ]);
        let history = PriceHistory::from_table(&table, 10, PairingMode::Independent);
        assert_eq!(history.dates, vec![ymd(2023, 5, 1)]);
        assert_eq!(history.prices, vec![99.0]);
    }

    #[test]
    fn pair_limit_is_respected() {
        let table = Table::new(vec![
            Column::new("Date1", vec![Cell::text("2023-01-01")]),
            Column::new("Price1", vec![Cell::Number(1.0)]),
            Column::new("Date11", vec![Cell::text("2024-01-01")]),
            Column::new("Price11", vec![Cell::Number(11.0)]),
        ]);

        let default_cap = PriceHistory::from_table(&table, 10, PairingMode::Independent);
        assert_eq!(default_cap.prices, vec![1.0]);

        let wider = PriceHistory::from_table(&table, 12, PairingMode::Independent);
        assert_eq!(wider.prices, vec![1.0, 11.0]);
    }

    #[test]
    fn dates_serialize_as_plain_days() {
        let history = PriceHistory {
            dates: vec![ymd(2023, 1, 1)],
            prices: vec![100.0],
        };
        let json = serde_json::to_value(&history).unwrap();
        assert_eq!(json["dates"][0], "2023-01-01");
        assert_eq!(json["prices"][0], 100.0);
    }
}
