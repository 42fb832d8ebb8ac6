//! Raw cell grids and their conversion into records

use droneops_domain::Record;
use tracing::warn;

use crate::a1::{CellRef, RangeRef};
use crate::error::{Result, StoreError};

/// Rows of cell values as returned by a sheet read
pub type Grid = Vec<Vec<String>>;

/// Turn a grid whose first row is the header into records.
///
/// Short rows are padded with empty cells. Cells past the header width
/// have no column name and are dropped.
pub fn records_from_grid(grid: Grid) -> Vec<Record> {
    let mut rows = grid.into_iter();
    let Some(header) = rows.next() else {
        return Vec::new();
    };

    rows.enumerate()
        .map(|(i, row)| {
            if row.len() > header.len() {
                warn!(
                    row = i + 2,
                    cells = row.len(),
                    columns = header.len(),
                    "dropping cells beyond header width"
                );
            }
            let mut cells = row.into_iter();
            header
                .iter()
                .map(|column| (column.clone(), cells.next().unwrap_or_default()))
                .collect::<Record>()
        })
        .collect()
}

/// Cut the cells covered by `range` out of a full sheet grid.
///
/// Trailing empty rows are trimmed the way a hosted sheet read trims them.
pub fn window(grid: &[Vec<String>], range: &RangeRef) -> Grid {
    let (first_row, last_row) = range.rows();
    let (first_col, last_col) = range.columns();

    let skip_rows = (first_row - 1) as usize;
    let take_rows = last_row.map_or(usize::MAX, |last| {
        last.saturating_add(1).saturating_sub(first_row) as usize
    });
    let skip_cols = (first_col - 1) as usize;
    let take_cols = last_col.map_or(usize::MAX, |last| {
        last.saturating_add(1).saturating_sub(first_col) as usize
    });

    let mut out: Grid = grid
        .iter()
        .skip(skip_rows)
        .take(take_rows)
        .map(|row| row.iter().skip(skip_cols).take(take_cols).cloned().collect())
        .collect();

    while out
        .last()
        .is_some_and(|row: &Vec<String>| row.iter().all(String::is_empty))
    {
        out.pop();
    }
    out
}

/// Write `value` into `cell`, growing the grid as needed.
///
/// The grid grows by at most one row, so a write may land in an existing
/// row or append directly after the last one.
pub fn set_cell(grid: &mut Grid, cell: &CellRef, value: &str) -> Result<()> {
    let row = (cell.row - 1) as usize;
    let column = (cell.column - 1) as usize;

    if row > grid.len() {
        return Err(StoreError::InvalidAddress {
            address: cell.to_string(),
            reason: format!("sheet has {} rows", grid.len()),
        });
    }
    if row == grid.len() {
        grid.push(Vec::new());
    }
    let cells = &mut grid[row];
    if cells.len() <= column {
        cells.resize(column + 1, String::new());
    }
    cells[column] = value.to_string();
    Ok(())
}
