//! In-process record store
//!
//! Holds each sheet as a grid in memory. Used as the test double for the
//! service and for running without a hosted sheet.

use async_trait::async_trait;
use droneops_domain::Record;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::a1::{CellRef, RangeRef};
use crate::error::{Result, StoreError};
use crate::grid::{self, Grid};
use crate::RecordStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    sheets: RwLock<HashMap<String, Grid>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a sheet, header row first.
    pub fn with_sheet<R, C>(mut self, name: impl Into<String>, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let grid: Grid = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        self.sheets.get_mut().insert(name.into(), grid);
        self
    }

    /// Copy of a sheet's current cells
    pub async fn snapshot(&self, name: &str) -> Option<Grid> {
        self.sheets.read().await.get(name).cloned()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn read_range(&self, range: &RangeRef) -> Result<Vec<Record>> {
        let sheets = self.sheets.read().await;
        let sheet = sheets
            .get(&range.sheet)
            .ok_or_else(|| StoreError::UnknownSheet(range.sheet.clone()))?;

        let records = grid::records_from_grid(grid::window(sheet, range));
        debug!(range = %range, records = records.len(), "read memory range");
        Ok(records)
    }

    async fn write_cell(&self, cell: &CellRef, value: &str) -> Result<()> {
        let mut sheets = self.sheets.write().await;
        let sheet = sheets
            .get_mut(&cell.sheet)
            .ok_or_else(|| StoreError::UnknownSheet(cell.sheet.clone()))?;

        grid::set_cell(sheet, cell, value)?;
        debug!(cell = %cell, "wrote memory cell");
        Ok(())
    }
}
