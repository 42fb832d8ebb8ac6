//! Record store backends for DroneOps
//!
//! The roster, fleet and mission data live in a spreadsheet. This crate
//! provides:
//! - A1 range and cell addressing (`pilot_roster!A1:Z`, `pilot_roster!G7`)
//! - Header-row grid to [`Record`] conversion
//! - The [`RecordStore`] trait and three backends: Google Sheets over HTTP,
//!   a directory of CSV files, and an in-memory store
//!
//! Reads are never cached and failed calls are never retried.

pub mod a1;
pub mod csv_store;
pub mod error;
pub mod grid;
pub mod memory;
pub mod sheets;

use async_trait::async_trait;
use droneops_domain::Record;

pub use a1::{CellRef, RangeRef};
pub use csv_store::CsvStore;
pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sheets::SheetsStore;

/// Tabular store addressed with sheet ranges and cells
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Read `range` and return one record per row after the header row.
    async fn read_range(&self, range: &RangeRef) -> Result<Vec<Record>>;

    /// Overwrite a single cell with `value`.
    async fn write_cell(&self, cell: &CellRef, value: &str) -> Result<()>;
}
