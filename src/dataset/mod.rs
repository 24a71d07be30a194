mod dataset_error;
pub mod dates;
mod fetcher;
pub mod table;
mod workbook;

pub use dataset_error::DatasetError;
pub use dates::normalize;
pub use fetcher::SourceFetcher;
pub use table::{Cell, Column, Table};
pub use workbook::ListingWorkbook;
