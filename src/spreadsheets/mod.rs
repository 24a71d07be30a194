pub mod export_xlsx;

pub use export_xlsx::{export_filename, export_price_history_xlsx, price_history_workbook};
