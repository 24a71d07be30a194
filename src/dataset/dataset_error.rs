use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum DatasetError {
    Io(String),
    Download(String),
    Workbook(String),
    SheetNotFound(String),
    MissingColumn(String),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Io(msg) => write!(f, "I/O error: {msg}"),
            DatasetError::Download(msg) => write!(f, "Download failed: {msg}"),
            DatasetError::Workbook(msg) => write!(f, "Workbook error: {msg}"),
            DatasetError::SheetNotFound(name) => write!(f, "Worksheet '{name}' not found"),
            DatasetError::MissingColumn(name) => write!(f, "Column '{name}' not found"),
        }
    }
}

impl Error for DatasetError {}

impl From<std::io::Error> for DatasetError {
    fn from(err: std::io::Error) -> Self {
        DatasetError::Io(err.to_string())
    }
}
