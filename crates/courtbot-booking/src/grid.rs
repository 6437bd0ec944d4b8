//! The slot grid and the pure lookups over it.
//!
//! A [`SlotGrid`] is a snapshot of one day's booking table: a header of court
//! labels and row-major time rows. It deserializes directly from the JSON the
//! page-context snapshot script produces, so the serde names here are part of
//! that script's contract.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotGrid {
    /// Court header labels, left to right, time column excluded.
    pub courts: Vec<String>,
    pub rows: Vec<SlotRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRow {
    pub time_label: String,
    pub cells: Vec<SlotCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotCell {
    pub open: bool,
    /// The cell's declared start time; open cells normally carry one.
    pub start_time: Option<String>,
}

/// Zero-based grid coordinates of one cell: `row` into [`SlotGrid::rows`],
/// `column` into that row's cells (court index).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRef {
    pub row: usize,
    pub column: usize,
}

/// One open slot, as reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenCourtEntry {
    /// 1-based court position in the grid.
    pub court: u32,
    /// The cell's start time, empty when the attribute was absent.
    pub time: String,
}

/// Lists every open cell in natural grid order: top-to-bottom, then
/// left-to-right within a row. No sorting or de-duplication beyond that.
#[must_use]
pub fn extract_open_courts(grid: &SlotGrid) -> Vec<OpenCourtEntry> {
    let mut entries = Vec::new();
    for row in &grid.rows {
        for (court, cell) in (1u32..).zip(&row.cells) {
            if cell.open {
                entries.push(OpenCourtEntry {
                    court,
                    time: cell.start_time.clone().unwrap_or_default(),
                });
            }
        }
    }
    entries
}

/// Finds the open cell for (`court_number`, `start_time`).
///
/// The row is matched by exact time-label equality, the column by a header
/// containing `Court {court_number}`. Returns `None` when the row or column
/// is missing or the cell is not open; the caller folds all three into one
/// slot-unavailable outcome.
#[must_use]
pub fn find_slot(grid: &SlotGrid, court_number: u32, start_time: &str) -> Option<SlotRef> {
    let row = grid
        .rows
        .iter()
        .position(|r| r.time_label == start_time)?;
    let header = format!("Court {court_number}");
    let column = grid.courts.iter().position(|c| c.contains(&header))?;
    let cell = grid.rows[row].cells.get(column)?;
    if cell.open {
        Some(SlotRef { row, column })
    } else {
        None
    }
}
