//! Sheet storage port.
//!
//! The gateway only needs four things from a tabular store: resolve a named
//! sheet, read it as a grid, append a row, and overwrite a single cell.
//! Two backends implement this:
//! - **Memory**: an in-process workbook, used for tests and local runs
//! - **Google Sheets**: the Sheets v4 REST API (requires `SPREADSHEET_ID`)

mod google;
mod memory;

pub use google::GoogleSheetsStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Cell, RowHandle};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Sheet '{0}' not found")]
    SheetNotFound(String),

    #[error("row {row} is outside sheet '{sheet}'")]
    RowOutOfRange { sheet: String, row: RowHandle },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sheets API error ({status}): {body}")]
    Api { status: u16, body: String },
}

/// Row-and-cell access to a workbook of named sheets.
///
/// Calls are individually atomic at best; nothing here makes a read followed
/// by a write atomic.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Whether a sheet with exactly this name exists
    async fn has_sheet(&self, sheet: &str) -> Result<bool, StoreError>;

    /// Every row of the sheet, header included. Rows may be ragged.
    async fn read_rows(&self, sheet: &str) -> Result<Vec<Vec<Cell>>, StoreError>;

    /// Append one row after the last non-empty row
    async fn append_row(&self, sheet: &str, row: Vec<Cell>) -> Result<(), StoreError>;

    /// Overwrite one cell; `column` is zero-based
    async fn write_cell(
        &self,
        sheet: &str,
        row: RowHandle,
        column: usize,
        value: Cell,
    ) -> Result<(), StoreError>;
}
