use astra::Response;
// errors.rs
use std::fmt;

use crate::dataset::DatasetError;

/// Errors originating from either the server logic
/// (routing, bad query strings, etc.) or downstream layers (dataset, export).
#[derive(Debug)]
pub enum ServerError {
    NotFound,
    BadRequest(String),
    DatasetError(String),
    XlsxError(String),
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::NotFound => write!(f, "Not Found"),
            ServerError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            ServerError::DatasetError(msg) => write!(f, "Dataset Error: {msg}"),
            ServerError::XlsxError(msg) => write!(f, "Spreadsheet Error: {msg}"),
            ServerError::InternalError => write!(f, "Internal Server Error"),
        }
    }
}

impl std::error::Error for ServerError {}

impl From<DatasetError> for ServerError {
    fn from(err: DatasetError) -> Self {
        match err {
            // A sheet the workbook doesn't have is a missing resource, not a crash.
            DatasetError::SheetNotFound(_) => ServerError::NotFound,
            other => ServerError::DatasetError(other.to_string()),
        }
    }
}
