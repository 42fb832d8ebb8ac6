//! Record store errors

use thiserror::Error;

/// Failures reading from or writing to the backing sheet store.
///
/// None of these are retried.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid address `{address}`: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Unknown sheet: {0}")]
    UnknownSheet(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sheets API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Background task failed: {0}")]
    Task(String),
}

impl StoreError {
    pub(crate) fn invalid_address(address: &str, reason: impl Into<String>) -> Self {
        StoreError::InvalidAddress {
            address: address.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
