use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Serialize)]
pub enum PortalError {
    #[error("Sheet with name {0} not found")]
    SheetNotFound(String),
    #[error("Failed to fetch rows from sheet {0}: {1}")]
    FetchFailed(String, String),
    #[error("Malformed row {row} in sheet {sheet}: {reason}")]
    MalformedRow {
        sheet: String,
        row: usize,
        reason: String,
    },
    #[error("Class details not found for class id {0}")]
    ClassNotFound(String),
    #[error("Class group details not found for class group id {0}")]
    ClassGroupNotFound(String),
    #[error("Cache error: {0}")]
    CacheError(String),
}
