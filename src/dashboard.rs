use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::dataset::{normalize, DatasetError, ListingWorkbook, Table};
use crate::domain::{addresses, extract_with, ExtractOptions, PropertyRecord};

/// Shared handle the server hands to every request.
///
/// Sheets are loaded and date-normalized once, on first use, and kept for the
/// life of the process. Picking another address only re-runs the extraction.
pub struct Dashboard {
    workbook: ListingWorkbook,
    options: ExtractOptions,
    sheets: Mutex<HashMap<String, Arc<Table>>>,
}

impl Dashboard {
    pub fn new(workbook: ListingWorkbook, options: ExtractOptions) -> Self {
        Self {
            workbook,
            options,
            sheets: Mutex::new(HashMap::new()),
        }
    }

    pub fn sheet_names(&self) -> &[String] {
        self.workbook.sheet_names()
    }

    pub fn default_sheet(&self) -> Option<&str> {
        self.sheet_names().first().map(String::as_str)
    }

    /// The normalized table for `sheet`, loading it on first request.
    ///
    /// The cache lock is not held while the workbook is read. When two
    /// requests race on a cold sheet, the first table inserted is kept.
    pub fn table(&self, sheet: &str) -> Result<Arc<Table>, DatasetError> {
        if let Some(table) = self.cached(sheet) {
            tracing::debug!(sheet, "sheet cache hit");
            return Ok(table);
        }

        let loaded = Arc::new(normalize(self.workbook.load(sheet)?));
        tracing::debug!(
            sheet,
            columns = ?loaded.column_names().collect::<Vec<_>>(),
            "normalized sheet cached"
        );

        let mut sheets = self.lock_sheets();
        let table = sheets.entry(sheet.to_string()).or_insert(loaded);
        Ok(Arc::clone(table))
    }

    fn cached(&self, sheet: &str) -> Option<Arc<Table>> {
        self.lock_sheets().get(sheet).cloned()
    }

    // A panic in another worker leaves the map itself intact.
    fn lock_sheets(&self) -> MutexGuard<'_, HashMap<String, Arc<Table>>> {
        self.sheets.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn addresses(&self, sheet: &str) -> Result<Vec<String>, DatasetError> {
        addresses(&self.table(sheet)?)
    }

    pub fn property(&self, sheet: &str, address: &str) -> Result<PropertyRecord, DatasetError> {
        let table = self.table(sheet)?;
        let record = extract_with(&table, address, &self.options);

        tracing::info!(
            sheet,
            address,
            points = record.price_history.dates.len(),
            "extracted property record"
        );
        Ok(record)
    }
}
