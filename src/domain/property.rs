// src/domain/property.rs

use serde::{Serialize, Serializer};

use super::price_history::{PairingMode, PriceHistory};
use crate::dataset::{Cell, DatasetError, Table};

pub const ADDRESS_COLUMN: &str = "Address";

/// Numbered Date/Price column pairs the listings sheets carry by default.
pub const DEFAULT_PRICE_PAIRS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    pub max_pairs: usize,
    pub pairing: PairingMode,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_pairs: DEFAULT_PRICE_PAIRS,
            pairing: PairingMode::Independent,
        }
    }
}

/// Every distinct non-missing value a column held for one address, first-seen first.
/// Only the first is shown; the rest are kept so conflicts can be spotted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScalarField {
    pub values: Vec<Cell>,
}

impl ScalarField {
    fn from_column(table: &Table, column: &str) -> Self {
        let values = table.column(column).map(|c| c.distinct()).unwrap_or_default();
        Self { values }
    }

    pub fn value(&self) -> Option<&Cell> {
        self.values.first()
    }

    pub fn is_present(&self) -> bool {
        !self.values.is_empty()
    }

    /// Number of later distinct values that `value()` hides.
    pub fn conflicts(&self) -> usize {
        self.values.len().saturating_sub(1)
    }
}

impl Serialize for ScalarField {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(s)
    }
}

/// Per-address summary: listing attributes plus the price history.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PropertyRecord {
    pub address: String,
    pub phone: ScalarField,
    pub listed_by: ScalarField,
    pub zillow_link: ScalarField,
    pub bedrooms: ScalarField,
    pub bathrooms: ScalarField,
    pub area_sqft: ScalarField,
    pub days_on_zillow: ScalarField,
    pub built_in: ScalarField,
    pub price_history: PriceHistory,
}

impl PropertyRecord {
    fn empty(address: &str) -> Self {
        Self {
            address: address.to_string(),
            ..Default::default()
        }
    }

    /// True when the address matched nothing worth showing.
    pub fn is_empty(&self) -> bool {
        self.price_history.is_empty() && self.attributes().iter().all(|(_, f)| !f.is_present())
    }

    /// Display label and field, in sidebar order.
    pub fn attributes(&self) -> [(&'static str, &ScalarField); 8] {
        [
            ("Phone", &self.phone),
            ("Listed By", &self.listed_by),
            ("Zillow Link", &self.zillow_link),
            ("Bedrooms", &self.bedrooms),
            ("Bathrooms", &self.bathrooms),
            ("Area (sqft)", &self.area_sqft),
            ("Days on Zillow", &self.days_on_zillow),
            ("Built in", &self.built_in),
        ]
    }
}

/// `extract_with` using the default ten pairs and independent pairing.
#[cfg(test)]
pub fn extract(table: &Table, address: &str) -> PropertyRecord {
    extract_with(table, address, &ExtractOptions::default())
}

pub fn extract_with(table: &Table, address: &str, opts: &ExtractOptions) -> PropertyRecord {
    let Some(address_col) = table.column(ADDRESS_COLUMN) else {
        return PropertyRecord::empty(address);
    };

    let matching = table.filter_rows(|i| address_key(&address_col.cells[i]).as_deref() == Some(address));
    if matching.is_empty() {
        tracing::debug!(address, "no rows for address");
        return PropertyRecord::empty(address);
    }

    // Each field maps to the exact column header the listings sheets use.
    macro_rules! scalar {
        ($column:expr) => {
            ScalarField::from_column(&matching, $column)
        };
    }

    let record = PropertyRecord {
        address: address.to_string(),
        phone: scalar!("Phone"),
        listed_by: scalar!("Listed By"),
        zillow_link: scalar!("Zillow Links"),
        bedrooms: scalar!("Bedrooms"),
        bathrooms: scalar!("Bathrooms"),
        area_sqft: scalar!("Area (sqft)"),
        days_on_zillow: scalar!("Days on Zillow"),
        built_in: scalar!("Built in"),
        price_history: PriceHistory::from_table(&matching, opts.max_pairs, opts.pairing),
    };

    if !record.price_history.is_aligned() {
        tracing::warn!(
            address,
            dates = record.price_history.dates.len(),
            prices = record.price_history.prices.len(),
            "price history dates and prices differ in length"
        );
    }

    record
}

/// Distinct addresses in the order they first appear, for the address picker.
pub fn addresses(table: &Table) -> Result<Vec<String>, DatasetError> {
    let column = table
        .column(ADDRESS_COLUMN)
        .ok_or_else(|| DatasetError::MissingColumn(ADDRESS_COLUMN.to_string()))?;

    Ok(column.distinct().iter().filter_map(address_key).collect())
}

fn address_key(cell: &Cell) -> Option<String> {
    if cell.is_missing() {
        None
    } else {
        Some(cell.to_string())
    }
}
