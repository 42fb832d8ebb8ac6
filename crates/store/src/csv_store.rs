//! CSV directory record store
//!
//! Each sheet is a `<sheet>.csv` file under one directory, header row
//! first. Writes rewrite the whole file through a temporary sibling.

use async_trait::async_trait;
use droneops_domain::Record;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::a1::{CellRef, RangeRef};
use crate::error::{Result, StoreError};
use crate::grid::{self, Grid};
use crate::RecordStore;

#[derive(Debug)]
pub struct CsvStore {
    dir: PathBuf,
    /// Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl CsvStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn sheet_path(&self, sheet: &str) -> Result<PathBuf> {
        if sheet.contains(&['/', '\\'][..]) || sheet == "." || sheet == ".." {
            return Err(StoreError::invalid_address(sheet, "sheet name is not a file name"));
        }
        Ok(self.dir.join(format!("{sheet}.csv")))
    }
}

#[async_trait]
impl RecordStore for CsvStore {
    async fn read_range(&self, range: &RangeRef) -> Result<Vec<Record>> {
        let path = self.sheet_path(&range.sheet)?;
        let sheet = range.sheet.clone();

        let full = run_blocking(move || read_grid(&path, &sheet)).await?;
        let records = grid::records_from_grid(grid::window(&full, range));
        debug!(range = %range, records = records.len(), "read csv range");
        Ok(records)
    }

    async fn write_cell(&self, cell: &CellRef, value: &str) -> Result<()> {
        let path = self.sheet_path(&cell.sheet)?;
        let _guard = self.write_lock.lock().await;

        let target = cell.clone();
        let value = value.to_string();
        run_blocking(move || {
            let mut full = read_grid(&path, &target.sheet)?;
            grid::set_cell(&mut full, &target, &value)?;
            write_grid(&path, &full)
        })
        .await?;

        info!(cell = %cell, "wrote csv cell");
        Ok(())
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
}

fn read_grid(path: &Path, sheet: &str) -> Result<Grid> {
    if !path.is_file() {
        return Err(StoreError::UnknownSheet(sheet.to_string()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    reader
        .records()
        .map(|row| -> Result<Vec<String>> { Ok(row?.iter().map(str::to_string).collect()) })
        .collect()
}

fn write_grid(path: &Path, grid: &Grid) -> Result<()> {
    let tmp = path.with_extension("csv.tmp");
    {
        let mut writer = csv::WriterBuilder::new().flexible(true).from_path(&tmp)?;
        for row in grid {
            writer.write_record(row)?;
        }
        writer.flush()?;
    }
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn store_with_roster() -> (tempfile::TempDir, CsvStore) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("pilot_roster.csv"),
            "pilot_id,name,skills,certifications,location,status,current_assignment\n\
             P001,Arjun,\"Mapping, Survey\",DGCA,Bangalore,Available,-\n\
             P002,Neha,Inspection,\"DGCA, Night Ops\",Mumbai,Assigned,PRJ001\n",
        )
        .unwrap();
        let store = CsvStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn test_read_quoted_cells() {
        let (_dir, store) = store_with_roster();
        let records = store
            .read_range(&"pilot_roster!A1:Z".parse().unwrap())
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("skills"), Some("Mapping, Survey"));
        assert_eq!(records[1].get("current_assignment"), Some("PRJ001"));
    }

    #[tokio::test]
    async fn test_write_cell_persists_to_file() {
        let (dir, store) = store_with_roster();
        let cell = CellRef::new("pilot_roster", "F", 3).unwrap();
        store.write_cell(&cell, "Available").await.unwrap();

        let reopened = CsvStore::new(dir.path());
        let records = reopened
            .read_range(&RangeRef::sheet("pilot_roster"))
            .await
            .unwrap();
        assert_eq!(records[1].get("status"), Some("Available"));
        assert_eq!(records[1].get("name"), Some("Neha"));
        assert!(!dir.path().join("pilot_roster.csv.tmp").exists());
    }

    #[tokio::test]
    async fn test_write_past_sheet_end_leaves_file_alone() {
        let (dir, store) = store_with_roster();
        let before = fs::read_to_string(dir.path().join("pilot_roster.csv")).unwrap();

        let cell = CellRef::new("pilot_roster", "F", 500_000).unwrap();
        let err = store.write_cell(&cell, "Available").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidAddress { .. }));

        let after = fs::read_to_string(dir.path().join("pilot_roster.csv")).unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_missing_sheet_file() {
        let (_dir, store) = store_with_roster();
        let err = store
            .read_range(&RangeRef::sheet("missions"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownSheet(_)));
    }

    #[tokio::test]
    async fn test_rejects_path_like_sheet_names() {
        let (_dir, store) = store_with_roster();
        let err = store
            .read_range(&RangeRef::sheet("../secrets"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidAddress { .. }));
    }
}
